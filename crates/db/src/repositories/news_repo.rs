//! Repository for the `news_articles` table.

use heritage_core::content::NewsArticle;
use heritage_core::language::Language;
use heritage_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{delete_from, LIST_FILTER, NEWEST_FIRST};
use crate::models::news::NewsArticleRow;
use crate::models::RecordFilter;

/// Column list for `news_articles` queries.
const COLUMNS: &str = "\
    id, language, url_slug, published, title, description, content, category, \
    author, featured_image, images, date, published_time, keywords, \
    created_at, updated_at";

/// Provides CRUD operations for news articles.
pub struct NewsRepo;

impl NewsRepo {
    pub async fn find_all(
        pool: &PgPool,
        filter: &RecordFilter,
    ) -> Result<Vec<NewsArticle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news_articles WHERE {LIST_FILTER} ORDER BY {NEWEST_FIRST}"
        );
        let rows = sqlx::query_as::<_, NewsArticleRow>(&query)
            .bind(filter.language_code())
            .bind(filter.published_only)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(NewsArticle::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news_articles WHERE id = $1");
        let row = sqlx::query_as::<_, NewsArticleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(NewsArticle::from))
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        language: Language,
        slug: &str,
    ) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM news_articles WHERE language = $1 AND url_slug = $2");
        let row = sqlx::query_as::<_, NewsArticleRow>(&query)
            .bind(language.code())
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(NewsArticle::from))
    }

    /// Insert an article. `images` is stored as a JSONB array.
    pub async fn create(pool: &PgPool, article: &NewsArticle) -> Result<NewsArticle, sqlx::Error> {
        let query = format!(
            "INSERT INTO news_articles \
                (language, url_slug, published, title, description, content, category, \
                 author, featured_image, images, date, published_time, keywords, \
                 created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                     COALESCE($14, now()), COALESCE($15, now())) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, NewsArticleRow>(&query)
            .bind(article.meta.language.code())
            .bind(&article.meta.url_slug)
            .bind(article.meta.published)
            .bind(&article.title)
            .bind(&article.description)
            .bind(&article.content)
            .bind(&article.category)
            .bind(&article.author)
            .bind(&article.featured_image)
            .bind(Json(&article.images))
            .bind(&article.date)
            .bind(&article.published_time)
            .bind(&article.keywords)
            .bind(article.meta.created_at)
            .bind(article.meta.updated_at)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        article: &NewsArticle,
    ) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query = format!(
            "UPDATE news_articles SET \
                url_slug = $3, published = $4, title = $5, description = $6, \
                content = $7, category = $8, author = $9, featured_image = $10, \
                images = $11, date = $12, published_time = $13, keywords = $14, \
                updated_at = COALESCE($15, now()) \
             WHERE id = $1 AND language = $2 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, NewsArticleRow>(&query)
            .bind(id)
            .bind(article.meta.language.code())
            .bind(&article.meta.url_slug)
            .bind(article.meta.published)
            .bind(&article.title)
            .bind(&article.description)
            .bind(&article.content)
            .bind(&article.category)
            .bind(&article.author)
            .bind(&article.featured_image)
            .bind(Json(&article.images))
            .bind(&article.date)
            .bind(&article.published_time)
            .bind(&article.keywords)
            .bind(article.meta.updated_at)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(NewsArticle::from))
    }

    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        language: Option<Language>,
    ) -> Result<Vec<Language>, sqlx::Error> {
        delete_from(pool, "news_articles", id, language).await
    }
}
