//! Repository for the `wellness_tips` table.

use heritage_core::content::WellnessTip;
use heritage_core::language::Language;
use heritage_core::types::DbId;
use sqlx::PgPool;

use super::{delete_from, LIST_FILTER, NEWEST_FIRST};
use crate::models::tip::WellnessTipRow;
use crate::models::RecordFilter;

/// Column list for `wellness_tips` queries.
const COLUMNS: &str = "\
    id, language, url_slug, published, title, description, content, \
    image_url, hero_image_url, alt_text, created_at, updated_at";

/// Provides CRUD operations for wellness tips.
pub struct WellnessTipRepo;

impl WellnessTipRepo {
    /// List tips matching `filter`, newest first.
    pub async fn find_all(
        pool: &PgPool,
        filter: &RecordFilter,
    ) -> Result<Vec<WellnessTip>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wellness_tips WHERE {LIST_FILTER} ORDER BY {NEWEST_FIRST}"
        );
        let rows = sqlx::query_as::<_, WellnessTipRow>(&query)
            .bind(filter.language_code())
            .bind(filter.published_only)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(WellnessTip::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WellnessTip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wellness_tips WHERE id = $1");
        let row = sqlx::query_as::<_, WellnessTipRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(WellnessTip::from))
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        language: Language,
        slug: &str,
    ) -> Result<Option<WellnessTip>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM wellness_tips WHERE language = $1 AND url_slug = $2");
        let row = sqlx::query_as::<_, WellnessTipRow>(&query)
            .bind(language.code())
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(WellnessTip::from))
    }

    /// Insert a tip, returning it with the generated id.
    pub async fn create(pool: &PgPool, tip: &WellnessTip) -> Result<WellnessTip, sqlx::Error> {
        let query = format!(
            "INSERT INTO wellness_tips \
                (language, url_slug, published, title, description, content, \
                 image_url, hero_image_url, alt_text, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, \
                     COALESCE($10, now()), COALESCE($11, now())) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, WellnessTipRow>(&query)
            .bind(tip.meta.language.code())
            .bind(&tip.meta.url_slug)
            .bind(tip.meta.published)
            .bind(&tip.title)
            .bind(&tip.description)
            .bind(&tip.content)
            .bind(&tip.image_url)
            .bind(&tip.hero_image_url)
            .bind(&tip.alt_text)
            .bind(tip.meta.created_at)
            .bind(tip.meta.updated_at)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Replace every mutable column of tip `id` within its language.
    ///
    /// Returns `None` when no row has that id in the tip's language.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        tip: &WellnessTip,
    ) -> Result<Option<WellnessTip>, sqlx::Error> {
        let query = format!(
            "UPDATE wellness_tips SET \
                url_slug = $3, published = $4, title = $5, description = $6, \
                content = $7, image_url = $8, hero_image_url = $9, alt_text = $10, \
                updated_at = COALESCE($11, now()) \
             WHERE id = $1 AND language = $2 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, WellnessTipRow>(&query)
            .bind(id)
            .bind(tip.meta.language.code())
            .bind(&tip.meta.url_slug)
            .bind(tip.meta.published)
            .bind(&tip.title)
            .bind(&tip.description)
            .bind(&tip.content)
            .bind(&tip.image_url)
            .bind(&tip.hero_image_url)
            .bind(&tip.alt_text)
            .bind(tip.meta.updated_at)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(WellnessTip::from))
    }

    /// Delete tip `id`, optionally only from one language partition.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        language: Option<Language>,
    ) -> Result<Vec<Language>, sqlx::Error> {
        delete_from(pool, "wellness_tips", id, language).await
    }
}
