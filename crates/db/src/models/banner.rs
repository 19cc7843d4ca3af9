use heritage_core::content::{Banner, RecordMeta};
use heritage_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::parse_language;

/// A row from the `banners` table.
#[derive(Debug, Clone, FromRow)]
pub struct BannerRow {
    pub id: DbId,
    pub language: String,
    pub url_slug: String,
    pub published: bool,
    pub title: String,
    pub image_url: String,
    pub link_url: String,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<BannerRow> for Banner {
    fn from(row: BannerRow) -> Self {
        Banner {
            meta: RecordMeta {
                id: row.id,
                url_slug: row.url_slug,
                language: parse_language(&row.language),
                published: row.published,
                created_at: Some(row.created_at),
                updated_at: Some(row.updated_at),
            },
            title: row.title,
            image_url: row.image_url,
            link_url: row.link_url,
            display_order: row.display_order,
        }
    }
}
