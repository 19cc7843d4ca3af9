use heritage_core::content::{FigureSection, HeritageFigure, Highlight, RecordMeta};
use heritage_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

use super::parse_language;

/// A row from the `heritage_figures` table.
///
/// `summary`, `sections` and `highlights` are JSONB columns; array order is
/// preserved by PostgreSQL so they round-trip unchanged.
#[derive(Debug, Clone, FromRow)]
pub struct HeritageFigureRow {
    pub id: DbId,
    pub language: String,
    pub url_slug: String,
    pub published: bool,
    pub full_name: String,
    pub title: String,
    pub category: String,
    pub header_letter: String,
    pub image_url: String,
    pub small_image_url: String,
    pub hero_image_url: String,
    pub summary: Json<Vec<String>>,
    pub introduction: String,
    pub quote: String,
    pub sections: Json<Vec<FigureSection>>,
    pub highlights: Json<Vec<Highlight>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<HeritageFigureRow> for HeritageFigure {
    fn from(row: HeritageFigureRow) -> Self {
        HeritageFigure {
            meta: RecordMeta {
                id: row.id,
                url_slug: row.url_slug,
                language: parse_language(&row.language),
                published: row.published,
                created_at: Some(row.created_at),
                updated_at: Some(row.updated_at),
            },
            full_name: row.full_name,
            title: row.title,
            category: row.category,
            header_letter: row.header_letter,
            image_url: row.image_url,
            small_image_url: row.small_image_url,
            hero_image_url: row.hero_image_url,
            summary: row.summary.0,
            introduction: row.introduction,
            quote: row.quote,
            sections: row.sections.0,
            highlights: row.highlights.0,
        }
    }
}
