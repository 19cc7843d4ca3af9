//! Degrading decorator over a primary and a fallback backend.
//!
//! Operations go to the primary while it is healthy. A recoverable primary
//! failure is logged and the same operation is retried on the fallback. A
//! connectivity failure additionally flips the decorator into degraded mode,
//! after which the primary is never consulted again for the lifetime of the
//! process.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use heritage_core::collection::Collection;
use heritage_core::language::Language;
use heritage_core::types::DbId;

use super::{BackendKind, FlatFileBackend, RelationalBackend, StorageBackend};
use crate::error::StorageError;
use crate::models::RecordFilter;
use crate::repositories::RepoRecord;

/// The store the API runs on: PostgreSQL when available, JSON files otherwise.
pub type ContentStore = FallbackBackend<RelationalBackend, FlatFileBackend>;

#[derive(Debug)]
pub struct FallbackBackend<P, F> {
    primary: Option<P>,
    fallback: F,
    degraded: AtomicBool,
}

impl<P: StorageBackend, F: StorageBackend> FallbackBackend<P, F> {
    /// Route to `primary`, falling back to `fallback` on failure.
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary: Some(primary),
            fallback,
            degraded: AtomicBool::new(false),
        }
    }

    /// Flat-file mode selected by configuration.
    pub fn fallback_only(fallback: F) -> Self {
        Self {
            primary: None,
            fallback,
            degraded: AtomicBool::new(false),
        }
    }

    /// Relational mode was requested but the primary could not be brought up.
    pub fn degraded(fallback: F) -> Self {
        Self {
            primary: None,
            fallback,
            degraded: AtomicBool::new(true),
        }
    }

    /// True once the primary has been abandoned.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::SeqCst)
    }

    /// The primary backend, if one was configured, regardless of health.
    pub fn primary(&self) -> Option<&P> {
        self.primary.as_ref()
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    fn active_primary(&self) -> Option<&P> {
        if self.is_degraded() {
            None
        } else {
            self.primary.as_ref()
        }
    }

    /// Decide whether a primary failure may be retried on the fallback.
    ///
    /// Returns the error back when it must reach the caller unchanged.
    fn absorb_failure(
        &self,
        operation: &'static str,
        collection: Collection,
        err: StorageError,
    ) -> Result<(), StorageError> {
        if !err.is_recoverable() {
            return Err(err);
        }
        if err.is_connectivity() && !self.degraded.swap(true, Ordering::SeqCst) {
            tracing::warn!(
                error = %err,
                "Relational backend unreachable, degrading to flat-file storage for the rest of this process"
            );
        }
        tracing::warn!(
            operation,
            %collection,
            error = %err,
            "Relational backend failed, served from flat-file store"
        );
        Ok(())
    }
}

impl ContentStore {
    /// Build the store from configuration.
    ///
    /// `database_url: None` selects flat-file mode. Otherwise a pool is
    /// created and migrated; any failure there degrades to flat-file mode
    /// instead of aborting startup.
    pub async fn connect(database_url: Option<&str>, data_dir: impl Into<PathBuf>) -> Self {
        let flat_file = FlatFileBackend::new(data_dir);
        let Some(database_url) = database_url else {
            tracing::info!(data_dir = %flat_file.data_dir().display(), "Using flat-file storage");
            return Self::fallback_only(flat_file);
        };

        let pool = match crate::create_pool(database_url).await {
            Ok(pool) => pool,
            Err(err) => {
                tracing::warn!(error = %err, "Database connection failed, degrading to flat-file storage");
                return Self::degraded(flat_file);
            }
        };
        if let Err(err) = crate::run_migrations(&pool).await {
            tracing::warn!(error = %err, "Database migrations failed, degrading to flat-file storage");
            return Self::degraded(flat_file);
        }

        tracing::info!("Using relational storage with flat-file fallback");
        Self::new(RelationalBackend::new(pool), flat_file)
    }
}

impl<P: StorageBackend, F: StorageBackend> StorageBackend for FallbackBackend<P, F> {
    fn kind(&self) -> BackendKind {
        match self.active_primary() {
            Some(primary) => primary.kind(),
            None => self.fallback.kind(),
        }
    }

    async fn list<R: RepoRecord>(&self, filter: &RecordFilter) -> Result<Vec<R>, StorageError> {
        if let Some(primary) = self.active_primary() {
            match primary.list::<R>(filter).await {
                Ok(records) => return Ok(records),
                Err(err) => self.absorb_failure("list", R::COLLECTION, err)?,
            }
        }
        self.fallback.list(filter).await
    }

    async fn find_by_id<R: RepoRecord>(
        &self,
        language: Language,
        id: DbId,
    ) -> Result<Option<R>, StorageError> {
        if let Some(primary) = self.active_primary() {
            match primary.find_by_id::<R>(language, id).await {
                Ok(record) => return Ok(record),
                Err(err) => self.absorb_failure("find_by_id", R::COLLECTION, err)?,
            }
        }
        self.fallback.find_by_id(language, id).await
    }

    async fn find_by_slug<R: RepoRecord>(
        &self,
        language: Language,
        slug: &str,
    ) -> Result<Option<R>, StorageError> {
        if let Some(primary) = self.active_primary() {
            match primary.find_by_slug::<R>(language, slug).await {
                Ok(record) => return Ok(record),
                Err(err) => self.absorb_failure("find_by_slug", R::COLLECTION, err)?,
            }
        }
        self.fallback.find_by_slug(language, slug).await
    }

    async fn insert<R: RepoRecord>(&self, record: R) -> Result<R, StorageError> {
        if let Some(primary) = self.active_primary() {
            match primary.insert(record.clone()).await {
                Ok(stored) => return Ok(stored),
                Err(err) => self.absorb_failure("insert", R::COLLECTION, err)?,
            }
        }
        self.fallback.insert(record).await
    }

    async fn replace<R: RepoRecord>(&self, id: DbId, record: R) -> Result<Option<R>, StorageError> {
        if let Some(primary) = self.active_primary() {
            match primary.replace(id, record.clone()).await {
                Ok(stored) => return Ok(stored),
                Err(err) => self.absorb_failure("replace", R::COLLECTION, err)?,
            }
        }
        self.fallback.replace(id, record).await
    }

    async fn delete<R: RepoRecord>(
        &self,
        id: DbId,
        language: Option<Language>,
    ) -> Result<Vec<Language>, StorageError> {
        if let Some(primary) = self.active_primary() {
            match primary.delete::<R>(id, language).await {
                Ok(removed) => return Ok(removed),
                Err(err) => self.absorb_failure("delete", R::COLLECTION, err)?,
            }
        }
        self.fallback.delete::<R>(id, language).await
    }
}
