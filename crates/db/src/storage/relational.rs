use heritage_core::language::Language;
use heritage_core::types::DbId;

use super::{BackendKind, StorageBackend};
use crate::error::StorageError;
use crate::models::RecordFilter;
use crate::repositories::RepoRecord;
use crate::DbPool;

/// PostgreSQL storage through the per-collection repositories.
#[derive(Debug, Clone)]
pub struct RelationalBackend {
    pool: DbPool,
}

impl RelationalBackend {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl StorageBackend for RelationalBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Relational
    }

    async fn list<R: RepoRecord>(&self, filter: &RecordFilter) -> Result<Vec<R>, StorageError> {
        Ok(R::find_all(&self.pool, filter).await?)
    }

    async fn find_by_id<R: RepoRecord>(
        &self,
        language: Language,
        id: DbId,
    ) -> Result<Option<R>, StorageError> {
        let record = R::find_by_id(&self.pool, id).await?;
        Ok(record.filter(|r| r.meta().language == language))
    }

    async fn find_by_slug<R: RepoRecord>(
        &self,
        language: Language,
        slug: &str,
    ) -> Result<Option<R>, StorageError> {
        Ok(R::find_by_slug(&self.pool, language, slug).await?)
    }

    async fn insert<R: RepoRecord>(&self, record: R) -> Result<R, StorageError> {
        R::create(&self.pool, &record).await.map_err(|err| {
            StorageError::from(err).with_slug(record.meta().language, &record.meta().url_slug)
        })
    }

    async fn replace<R: RepoRecord>(&self, id: DbId, record: R) -> Result<Option<R>, StorageError> {
        R::update(&self.pool, id, &record).await.map_err(|err| {
            StorageError::from(err).with_slug(record.meta().language, &record.meta().url_slug)
        })
    }

    async fn delete<R: RepoRecord>(
        &self,
        id: DbId,
        language: Option<Language>,
    ) -> Result<Vec<Language>, StorageError> {
        Ok(R::delete(&self.pool, id, language).await?)
    }
}
