//! Repository for the `podcasts` table.

use heritage_core::content::Podcast;
use heritage_core::language::Language;
use heritage_core::types::DbId;
use sqlx::PgPool;

use super::{delete_from, LIST_FILTER, NEWEST_FIRST};
use crate::models::podcast::PodcastRow;
use crate::models::RecordFilter;

/// Column list for `podcasts` queries.
const COLUMNS: &str = "\
    id, language, url_slug, published, title, description, video_id, \
    image_url, alt_text, created_at, updated_at";

/// Provides CRUD operations for podcast episodes.
pub struct PodcastRepo;

impl PodcastRepo {
    pub async fn find_all(pool: &PgPool, filter: &RecordFilter) -> Result<Vec<Podcast>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM podcasts WHERE {LIST_FILTER} ORDER BY {NEWEST_FIRST}");
        let rows = sqlx::query_as::<_, PodcastRow>(&query)
            .bind(filter.language_code())
            .bind(filter.published_only)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Podcast::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Podcast>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM podcasts WHERE id = $1");
        let row = sqlx::query_as::<_, PodcastRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Podcast::from))
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        language: Language,
        slug: &str,
    ) -> Result<Option<Podcast>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM podcasts WHERE language = $1 AND url_slug = $2");
        let row = sqlx::query_as::<_, PodcastRow>(&query)
            .bind(language.code())
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Podcast::from))
    }

    pub async fn create(pool: &PgPool, podcast: &Podcast) -> Result<Podcast, sqlx::Error> {
        let query = format!(
            "INSERT INTO podcasts \
                (language, url_slug, published, title, description, video_id, \
                 image_url, alt_text, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, now()), COALESCE($10, now())) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PodcastRow>(&query)
            .bind(podcast.meta.language.code())
            .bind(&podcast.meta.url_slug)
            .bind(podcast.meta.published)
            .bind(&podcast.title)
            .bind(&podcast.description)
            .bind(&podcast.video_id)
            .bind(&podcast.image_url)
            .bind(&podcast.alt_text)
            .bind(podcast.meta.created_at)
            .bind(podcast.meta.updated_at)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        podcast: &Podcast,
    ) -> Result<Option<Podcast>, sqlx::Error> {
        let query = format!(
            "UPDATE podcasts SET \
                url_slug = $3, published = $4, title = $5, description = $6, \
                video_id = $7, image_url = $8, alt_text = $9, \
                updated_at = COALESCE($10, now()) \
             WHERE id = $1 AND language = $2 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PodcastRow>(&query)
            .bind(id)
            .bind(podcast.meta.language.code())
            .bind(&podcast.meta.url_slug)
            .bind(podcast.meta.published)
            .bind(&podcast.title)
            .bind(&podcast.description)
            .bind(&podcast.video_id)
            .bind(&podcast.image_url)
            .bind(&podcast.alt_text)
            .bind(podcast.meta.updated_at)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Podcast::from))
    }

    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        language: Option<Language>,
    ) -> Result<Vec<Language>, sqlx::Error> {
        delete_from(pool, "podcasts", id, language).await
    }
}
