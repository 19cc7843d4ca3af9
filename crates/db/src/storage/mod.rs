//! Storage backends behind the Content API.
//!
//! [`StorageBackend`] is implemented by the PostgreSQL-backed
//! [`RelationalBackend`], the JSON-document [`FlatFileBackend`], and the
//! [`FallbackBackend`] decorator that routes to the first and degrades to
//! the second. Handlers only ever see a [`ContentStore`].

pub mod fallback;
pub mod flat_file;
pub mod relational;

pub use fallback::{ContentStore, FallbackBackend};
pub use flat_file::FlatFileBackend;
pub use relational::RelationalBackend;

use std::fmt;
use std::future::Future;

use heritage_core::language::Language;
use heritage_core::types::DbId;
use serde::Serialize;

use crate::error::StorageError;
use crate::models::RecordFilter;
use crate::repositories::RepoRecord;

/// Which physical store served a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    Relational,
    FlatFile,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendKind::Relational => "relational",
            BackendKind::FlatFile => "flat-file",
        })
    }
}

/// Persistence operations shared by every backend.
///
/// Records passed to `insert` and `replace` have already been through
/// `heritage_core::lifecycle`; backends assign ids and enforce slug
/// uniqueness per `(collection, language)`.
pub trait StorageBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Records matching `filter`, in the collection's listing order.
    fn list<R: RepoRecord>(
        &self,
        filter: &RecordFilter,
    ) -> impl Future<Output = Result<Vec<R>, StorageError>> + Send;

    fn find_by_id<R: RepoRecord>(
        &self,
        language: Language,
        id: DbId,
    ) -> impl Future<Output = Result<Option<R>, StorageError>> + Send;

    fn find_by_slug<R: RepoRecord>(
        &self,
        language: Language,
        slug: &str,
    ) -> impl Future<Output = Result<Option<R>, StorageError>> + Send;

    /// Persist a new record in its language partition and return it with
    /// the assigned id.
    fn insert<R: RepoRecord>(
        &self,
        record: R,
    ) -> impl Future<Output = Result<R, StorageError>> + Send;

    /// Replace record `id` in `record`'s language partition.
    ///
    /// Returns `None` when the partition holds no such id. The stored
    /// `createdAt` is kept.
    fn replace<R: RepoRecord>(
        &self,
        id: DbId,
        record: R,
    ) -> impl Future<Output = Result<Option<R>, StorageError>> + Send;

    /// Remove `id` from one partition, or from every partition holding it
    /// when `language` is `None`. Returns the partitions that lost a record.
    fn delete<R: RepoRecord>(
        &self,
        id: DbId,
        language: Option<Language>,
    ) -> impl Future<Output = Result<Vec<Language>, StorageError>> + Send;
}
