//! Repository for the `heritage_figures` table.
//!
//! `summary`, `sections` and `highlights` are bound and decoded as JSONB
//! through [`sqlx::types::Json`], so nested structure and array order
//! survive the round-trip.

use heritage_core::content::HeritageFigure;
use heritage_core::language::Language;
use heritage_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{delete_from, LIST_FILTER, NEWEST_FIRST};
use crate::models::figure::HeritageFigureRow;
use crate::models::RecordFilter;

/// Column list for `heritage_figures` queries.
const COLUMNS: &str = "\
    id, language, url_slug, published, full_name, title, category, header_letter, \
    image_url, small_image_url, hero_image_url, summary, introduction, quote, \
    sections, highlights, created_at, updated_at";

/// Provides CRUD operations for heritage figure profiles.
pub struct HeritageFigureRepo;

impl HeritageFigureRepo {
    pub async fn find_all(
        pool: &PgPool,
        filter: &RecordFilter,
    ) -> Result<Vec<HeritageFigure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM heritage_figures WHERE {LIST_FILTER} ORDER BY {NEWEST_FIRST}"
        );
        let rows = sqlx::query_as::<_, HeritageFigureRow>(&query)
            .bind(filter.language_code())
            .bind(filter.published_only)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(HeritageFigure::from).collect())
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<HeritageFigure>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heritage_figures WHERE id = $1");
        let row = sqlx::query_as::<_, HeritageFigureRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(HeritageFigure::from))
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        language: Language,
        slug: &str,
    ) -> Result<Option<HeritageFigure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM heritage_figures WHERE language = $1 AND url_slug = $2"
        );
        let row = sqlx::query_as::<_, HeritageFigureRow>(&query)
            .bind(language.code())
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(HeritageFigure::from))
    }

    pub async fn create(
        pool: &PgPool,
        figure: &HeritageFigure,
    ) -> Result<HeritageFigure, sqlx::Error> {
        let query = format!(
            "INSERT INTO heritage_figures \
                (language, url_slug, published, full_name, title, category, header_letter, \
                 image_url, small_image_url, hero_image_url, summary, introduction, quote, \
                 sections, highlights, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                     COALESCE($16, now()), COALESCE($17, now())) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, HeritageFigureRow>(&query)
            .bind(figure.meta.language.code())
            .bind(&figure.meta.url_slug)
            .bind(figure.meta.published)
            .bind(&figure.full_name)
            .bind(&figure.title)
            .bind(&figure.category)
            .bind(&figure.header_letter)
            .bind(&figure.image_url)
            .bind(&figure.small_image_url)
            .bind(&figure.hero_image_url)
            .bind(Json(&figure.summary))
            .bind(&figure.introduction)
            .bind(&figure.quote)
            .bind(Json(&figure.sections))
            .bind(Json(&figure.highlights))
            .bind(figure.meta.created_at)
            .bind(figure.meta.updated_at)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        figure: &HeritageFigure,
    ) -> Result<Option<HeritageFigure>, sqlx::Error> {
        let query = format!(
            "UPDATE heritage_figures SET \
                url_slug = $3, published = $4, full_name = $5, title = $6, category = $7, \
                header_letter = $8, image_url = $9, small_image_url = $10, \
                hero_image_url = $11, summary = $12, introduction = $13, quote = $14, \
                sections = $15, highlights = $16, updated_at = COALESCE($17, now()) \
             WHERE id = $1 AND language = $2 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, HeritageFigureRow>(&query)
            .bind(id)
            .bind(figure.meta.language.code())
            .bind(&figure.meta.url_slug)
            .bind(figure.meta.published)
            .bind(&figure.full_name)
            .bind(&figure.title)
            .bind(&figure.category)
            .bind(&figure.header_letter)
            .bind(&figure.image_url)
            .bind(&figure.small_image_url)
            .bind(&figure.hero_image_url)
            .bind(Json(&figure.summary))
            .bind(&figure.introduction)
            .bind(&figure.quote)
            .bind(Json(&figure.sections))
            .bind(Json(&figure.highlights))
            .bind(figure.meta.updated_at)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(HeritageFigure::from))
    }

    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        language: Option<Language>,
    ) -> Result<Vec<Language>, sqlx::Error> {
        delete_from(pool, "heritage_figures", id, language).await
    }
}
