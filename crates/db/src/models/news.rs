use heritage_core::content::{NewsArticle, RecordMeta};
use heritage_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

use super::parse_language;

/// A row from the `news_articles` table.
#[derive(Debug, Clone, FromRow)]
pub struct NewsArticleRow {
    pub id: DbId,
    pub language: String,
    pub url_slug: String,
    pub published: bool,
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub featured_image: String,
    /// JSONB array of image URLs.
    pub images: Json<Vec<String>>,
    pub date: String,
    pub published_time: String,
    pub keywords: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<NewsArticleRow> for NewsArticle {
    fn from(row: NewsArticleRow) -> Self {
        NewsArticle {
            meta: RecordMeta {
                id: row.id,
                url_slug: row.url_slug,
                language: parse_language(&row.language),
                published: row.published,
                created_at: Some(row.created_at),
                updated_at: Some(row.updated_at),
            },
            title: row.title,
            description: row.description,
            content: row.content,
            category: row.category,
            author: row.author,
            featured_image: row.featured_image,
            images: row.images.0,
            date: row.date,
            published_time: row.published_time,
            keywords: row.keywords,
        }
    }
}
