//! One repository per content table.
//!
//! Repositories are stateless unit structs taking `&PgPool`; queries build
//! their column lists from per-table constants. [`RepoRecord`] lets generic
//! storage code reach the right repository from a record type.

pub mod banner_repo;
pub mod figure_repo;
pub mod news_repo;
pub mod podcast_repo;
pub mod tip_repo;

pub use banner_repo::BannerRepo;
pub use figure_repo::HeritageFigureRepo;
pub use news_repo::NewsRepo;
pub use podcast_repo::PodcastRepo;
pub use tip_repo::WellnessTipRepo;

use std::future::Future;

use heritage_core::content::{
    Banner, ContentRecord, HeritageFigure, NewsArticle, Podcast, WellnessTip,
};
use heritage_core::language::Language;
use heritage_core::types::DbId;
use sqlx::PgPool;

use crate::models::{parse_language, RecordFilter};

/// `WHERE` clause shared by every `find_all`: `$1` is the nullable language
/// code, `$2` the published-only flag.
pub(crate) const LIST_FILTER: &str =
    "($1::text IS NULL OR language = $1) AND ($2::boolean = false OR published = true)";

/// Default listing order.
pub(crate) const NEWEST_FIRST: &str = "created_at DESC, id DESC";

/// Delete `id` from `table`, optionally inside one language partition, and
/// report which partitions lost a row.
pub(crate) async fn delete_from(
    pool: &PgPool,
    table: &str,
    id: DbId,
    language: Option<Language>,
) -> Result<Vec<Language>, sqlx::Error> {
    let query = format!(
        "DELETE FROM {table} WHERE id = $1 AND ($2::text IS NULL OR language = $2) \
         RETURNING language"
    );
    let codes: Vec<String> = sqlx::query_scalar(&query)
        .bind(id)
        .bind(language.map(Language::code))
        .fetch_all(pool)
        .await?;
    Ok(codes.iter().map(|code| parse_language(code)).collect())
}

// ---------------------------------------------------------------------------
// Record -> repository bridge
// ---------------------------------------------------------------------------

/// A content record backed by a relational repository.
pub trait RepoRecord: ContentRecord {
    fn find_all(
        pool: &PgPool,
        filter: &RecordFilter,
    ) -> impl Future<Output = Result<Vec<Self>, sqlx::Error>> + Send;

    fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> impl Future<Output = Result<Option<Self>, sqlx::Error>> + Send;

    fn find_by_slug(
        pool: &PgPool,
        language: Language,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Self>, sqlx::Error>> + Send;

    fn create(pool: &PgPool, record: &Self)
        -> impl Future<Output = Result<Self, sqlx::Error>> + Send;

    fn update(
        pool: &PgPool,
        id: DbId,
        record: &Self,
    ) -> impl Future<Output = Result<Option<Self>, sqlx::Error>> + Send;

    fn delete(
        pool: &PgPool,
        id: DbId,
        language: Option<Language>,
    ) -> impl Future<Output = Result<Vec<Language>, sqlx::Error>> + Send;
}

macro_rules! impl_repo_record {
    ($record:ty => $repo:ty) => {
        impl RepoRecord for $record {
            fn find_all(
                pool: &PgPool,
                filter: &RecordFilter,
            ) -> impl Future<Output = Result<Vec<Self>, sqlx::Error>> + Send {
                <$repo>::find_all(pool, filter)
            }

            fn find_by_id(
                pool: &PgPool,
                id: DbId,
            ) -> impl Future<Output = Result<Option<Self>, sqlx::Error>> + Send {
                <$repo>::find_by_id(pool, id)
            }

            fn find_by_slug(
                pool: &PgPool,
                language: Language,
                slug: &str,
            ) -> impl Future<Output = Result<Option<Self>, sqlx::Error>> + Send {
                <$repo>::find_by_slug(pool, language, slug)
            }

            fn create(
                pool: &PgPool,
                record: &Self,
            ) -> impl Future<Output = Result<Self, sqlx::Error>> + Send {
                <$repo>::create(pool, record)
            }

            fn update(
                pool: &PgPool,
                id: DbId,
                record: &Self,
            ) -> impl Future<Output = Result<Option<Self>, sqlx::Error>> + Send {
                <$repo>::update(pool, id, record)
            }

            fn delete(
                pool: &PgPool,
                id: DbId,
                language: Option<Language>,
            ) -> impl Future<Output = Result<Vec<Language>, sqlx::Error>> + Send {
                <$repo>::delete(pool, id, language)
            }
        }
    };
}

impl_repo_record!(NewsArticle => NewsRepo);
impl_repo_record!(WellnessTip => WellnessTipRepo);
impl_repo_record!(HeritageFigure => HeritageFigureRepo);
impl_repo_record!(Podcast => PodcastRepo);
impl_repo_record!(Banner => BannerRepo);
