use heritage_core::content::{RecordMeta, WellnessTip};
use heritage_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::parse_language;

/// A row from the `wellness_tips` table.
#[derive(Debug, Clone, FromRow)]
pub struct WellnessTipRow {
    pub id: DbId,
    pub language: String,
    pub url_slug: String,
    pub published: bool,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image_url: String,
    pub hero_image_url: String,
    pub alt_text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<WellnessTipRow> for WellnessTip {
    fn from(row: WellnessTipRow) -> Self {
        WellnessTip {
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
            image_url: row.image_url,
            hero_image_url: row.hero_image_url,
            alt_text: row.alt_text,
        }
    }
}
