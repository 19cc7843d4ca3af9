use heritage_core::content::{Podcast, RecordMeta};
use heritage_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::parse_language;

/// A row from the `podcasts` table.
#[derive(Debug, Clone, FromRow)]
pub struct PodcastRow {
    pub id: DbId,
    pub language: String,
    pub url_slug: String,
    pub published: bool,
    pub title: String,
    pub description: String,
    pub video_id: String,
    pub image_url: String,
    pub alt_text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PodcastRow> for Podcast {
    fn from(row: PodcastRow) -> Self {
        Podcast {
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
            video_id: row.video_id,
            image_url: row.image_url,
            alt_text: row.alt_text,
        }
    }
}
