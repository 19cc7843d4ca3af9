//! Collection handlers shared by news, tips, figures, podcasts and banners.
//!
//! Every handler is generic over the record type; `routes::content` mounts
//! one instantiation per collection. Public reads only ever return
//! published records. Admin reads and all writes require [`RequireApiKey`].
//! Successful writes invalidate every cache key of the collection.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use heritage_core::cache::CacheKey;
use heritage_core::categories::distinct_categories;
use heritage_core::collection::Collection;
use heritage_core::error::CoreError;
use heritage_core::language::Language;
use heritage_core::lifecycle;
use heritage_core::types::DbId;
use heritage_db::models::RecordFilter;
use heritage_db::repositories::RepoRecord;
use heritage_db::storage::StorageBackend;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::RequireApiKey;
use crate::state::AppState;

/// Optional `?lang=vi|en` selector.
#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    pub lang: Option<String>,
}

impl LanguageQuery {
    /// The requested language, if any. Unknown codes are a bad request.
    pub fn language(&self) -> AppResult<Option<Language>> {
        match self.lang.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(code) => code
                .parse()
                .map(Some)
                .map_err(|_| AppError::BadRequest(format!("Unsupported language '{code}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// `{ <documentKey>: [...] }`, plus `heritageCategories` for figures.
fn list_body<R: RepoRecord>(records: &[R]) -> AppResult<Value> {
    let items = serde_json::to_value(records).map_err(|e| CoreError::Internal(e.to_string()))?;

    let mut body = Map::new();
    if R::COLLECTION == Collection::Figures {
        let categories = match &items {
            Value::Array(figures) => {
                distinct_categories(figures.iter().filter_map(|f| f["category"].as_str()))
            }
            _ => Vec::new(),
        };
        body.insert("heritageCategories".into(), Value::from(categories));
    }
    body.insert(R::COLLECTION.document_key().into(), items);
    Ok(Value::Object(body))
}

async fn public_list<R: RepoRecord>(state: &AppState, language: Language) -> AppResult<Value> {
    let key = CacheKey::new(R::COLLECTION, language, true);
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(cached);
    }

    let records: Vec<R> = state.store.list(&RecordFilter::public(language)).await?;
    let body = list_body(&records)?;
    state
        .cache
        .set(key, body.clone(), state.cache.default_ttl())
        .await;
    Ok(body)
}

async fn admin_list<R: RepoRecord>(state: &AppState, language: Language) -> AppResult<Value> {
    let records: Vec<R> = state.store.list(&RecordFilter::admin(language)).await?;
    list_body(&records)
}

async fn published_by_slug<R: RepoRecord>(
    state: &AppState,
    language: Language,
    slug: &str,
) -> AppResult<R> {
    state
        .store
        .find_by_slug::<R>(language, slug)
        .await?
        .filter(|record| record.meta().published)
        .ok_or_else(|| {
            AppError::Core(CoreError::SlugNotFound {
                entity: R::COLLECTION.entity_name(),
                slug: slug.to_string(),
            })
        })
}

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

/// GET /api/{collection}
///
/// Published records of the default language, or of `?lang=`.
pub async fn list_public<R: RepoRecord>(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> AppResult<impl IntoResponse> {
    let language = query.language()?.unwrap_or_default();
    Ok(Json(public_list::<R>(&state, language).await?))
}

/// GET /api/{collection}-en
pub async fn list_public_en<R: RepoRecord>(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(public_list::<R>(&state, Language::En).await?))
}

/// GET /api/{collection}/slug/{slug}
///
/// A single published record. Drafts are reported as not found.
pub async fn get_by_slug<R: RepoRecord>(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(published_by_slug::<R>(&state, Language::Vi, &slug).await?))
}

/// GET /api/{collection}/slug/{slug}/en
pub async fn get_by_slug_en<R: RepoRecord>(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(published_by_slug::<R>(&state, Language::En, &slug).await?))
}

// ---------------------------------------------------------------------------
// Admin reads
// ---------------------------------------------------------------------------

/// GET /api/admin/{collection}
///
/// Every record of the language, published or not. Never cached.
pub async fn list_admin<R: RepoRecord>(
    _admin: RequireApiKey,
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> AppResult<impl IntoResponse> {
    let language = query.language()?.unwrap_or_default();
    Ok(Json(admin_list::<R>(&state, language).await?))
}

/// GET /api/admin/{collection}-en
pub async fn list_admin_en<R: RepoRecord>(
    _admin: RequireApiKey,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(admin_list::<R>(&state, Language::En).await?))
}

// ---------------------------------------------------------------------------
// Admin writes
// ---------------------------------------------------------------------------

/// POST /api/admin/{collection}
///
/// The record's language comes from `?lang=` when given, else from the body.
pub async fn create<R: RepoRecord>(
    _admin: RequireApiKey,
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
    Json(mut record): Json<R>,
) -> AppResult<impl IntoResponse> {
    if let Some(language) = query.language()? {
        record.meta_mut().language = language;
    }

    let record = lifecycle::prepare_create(record, Utc::now())?;
    let stored = state.store.insert(record).await?;
    state.cache.invalidate_collection(R::COLLECTION).await;

    tracing::info!(
        collection = %R::COLLECTION,
        language = %stored.meta().language,
        id = stored.meta().id,
        slug = %stored.meta().url_slug,
        "Record created",
    );

    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /api/admin/{collection}/{id}
///
/// Full-record replace inside the record's language partition.
pub async fn update<R: RepoRecord>(
    _admin: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<LanguageQuery>,
    Json(mut record): Json<R>,
) -> AppResult<impl IntoResponse> {
    if let Some(language) = query.language()? {
        record.meta_mut().language = language;
    }

    let record = lifecycle::prepare_update(record, id, Utc::now())?;
    let stored = state
        .store
        .replace(id, record)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: R::COLLECTION.entity_name(),
            id,
        }))?;
    state.cache.invalidate_collection(R::COLLECTION).await;

    tracing::info!(
        collection = %R::COLLECTION,
        language = %stored.meta().language,
        id,
        "Record updated",
    );

    Ok(Json(stored))
}

/// DELETE /api/admin/{collection}/{id}
///
/// Removes the id from `?lang=`'s partition, or from every partition that
/// holds it when no language is given.
pub async fn delete<R: RepoRecord>(
    _admin: RequireApiKey,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<LanguageQuery>,
) -> AppResult<impl IntoResponse> {
    let removed = state.store.delete::<R>(id, query.language()?).await?;
    if removed.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: R::COLLECTION.entity_name(),
            id,
        }));
    }
    state.cache.invalidate_collection(R::COLLECTION).await;

    tracing::info!(collection = %R::COLLECTION, id, languages = ?removed, "Record deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use heritage_core::content::{HeritageFigure, Podcast};

    use super::*;

    #[test]
    fn figure_lists_carry_categories() {
        let figures = vec![
            HeritageFigure {
                full_name: "A".into(),
                category: "Âm nhạc".into(),
                ..HeritageFigure::default()
            },
            HeritageFigure {
                full_name: "B".into(),
                category: "Âm nhạc".into(),
                ..HeritageFigure::default()
            },
        ];
        let body = list_body(&figures).unwrap();
        assert_eq!(body["heritageCategories"], serde_json::json!(["Âm nhạc"]));
        assert_eq!(body["heritageFigures"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn other_lists_have_only_the_document_key() {
        let body = list_body::<Podcast>(&[]).unwrap();
        assert_eq!(body, serde_json::json!({"podcasts": []}));
    }

    #[test]
    fn language_query_parsing() {
        let q = |lang: Option<&str>| LanguageQuery {
            lang: lang.map(str::to_string),
        };
        assert_eq!(q(None).language().unwrap(), None);
        assert_eq!(q(Some("")).language().unwrap(), None);
        assert_eq!(q(Some("en")).language().unwrap(), Some(Language::En));
        assert!(q(Some("fr")).language().is_err());
    }
}
