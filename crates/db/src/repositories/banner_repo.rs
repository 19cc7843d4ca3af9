//! Repository for the `banners` table.
//!
//! Unlike the other collections, banners list in `display_order` ascending.

use heritage_core::content::Banner;
use heritage_core::language::Language;
use heritage_core::types::DbId;
use sqlx::PgPool;

use super::{delete_from, LIST_FILTER};
use crate::models::banner::BannerRow;
use crate::models::RecordFilter;

/// Column list for `banners` queries.
const COLUMNS: &str = "\
    id, language, url_slug, published, title, image_url, link_url, \
    display_order, created_at, updated_at";

/// Provides CRUD operations for homepage banners.
pub struct BannerRepo;

impl BannerRepo {
    pub async fn find_all(pool: &PgPool, filter: &RecordFilter) -> Result<Vec<Banner>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM banners WHERE {LIST_FILTER} ORDER BY display_order ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, BannerRow>(&query)
            .bind(filter.language_code())
            .bind(filter.published_only)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Banner::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Banner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM banners WHERE id = $1");
        let row = sqlx::query_as::<_, BannerRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Banner::from))
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        language: Language,
        slug: &str,
    ) -> Result<Option<Banner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM banners WHERE language = $1 AND url_slug = $2");
        let row = sqlx::query_as::<_, BannerRow>(&query)
            .bind(language.code())
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Banner::from))
    }

    pub async fn create(pool: &PgPool, banner: &Banner) -> Result<Banner, sqlx::Error> {
        let query = format!(
            "INSERT INTO banners \
                (language, url_slug, published, title, image_url, link_url, \
                 display_order, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, now()), COALESCE($9, now())) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, BannerRow>(&query)
            .bind(banner.meta.language.code())
            .bind(&banner.meta.url_slug)
            .bind(banner.meta.published)
            .bind(&banner.title)
            .bind(&banner.image_url)
            .bind(&banner.link_url)
            .bind(banner.display_order)
            .bind(banner.meta.created_at)
            .bind(banner.meta.updated_at)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        banner: &Banner,
    ) -> Result<Option<Banner>, sqlx::Error> {
        let query = format!(
            "UPDATE banners SET \
                url_slug = $3, published = $4, title = $5, image_url = $6, \
                link_url = $7, display_order = $8, updated_at = COALESCE($9, now()) \
             WHERE id = $1 AND language = $2 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, BannerRow>(&query)
            .bind(id)
            .bind(banner.meta.language.code())
            .bind(&banner.meta.url_slug)
            .bind(banner.meta.published)
            .bind(&banner.title)
            .bind(&banner.image_url)
            .bind(&banner.link_url)
            .bind(banner.display_order)
            .bind(banner.meta.updated_at)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Banner::from))
    }

    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        language: Option<Language>,
    ) -> Result<Vec<Language>, sqlx::Error> {
        delete_from(pool, "banners", id, language).await
    }
}
