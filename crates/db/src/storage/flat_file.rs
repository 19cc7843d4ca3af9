//! JSON-document storage: one file per `(collection, language)`.
//!
//! Each file is an object whose `document_key` entry holds the record array,
//! e.g. `{ "wellnessTips": [...] }`. Other top-level keys (such as
//! `heritageCategories`) are preserved on write. A missing file reads as an
//! empty collection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use heritage_core::collection::Collection;
use heritage_core::language::Language;
use heritage_core::types::DbId;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::{BackendKind, StorageBackend};
use crate::error::StorageError;
use crate::models::RecordFilter;
use crate::repositories::RepoRecord;

type Document = Map<String, Value>;

#[derive(Debug)]
pub struct FlatFileBackend {
    data_dir: PathBuf,
    /// Serializes read-modify-write cycles per collection.
    write_locks: HashMap<Collection, Mutex<()>>,
}

impl FlatFileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let write_locks = Collection::ALL
            .into_iter()
            .map(|c| (c, Mutex::new(())))
            .collect();
        Self {
            data_dir: data_dir.into(),
            write_locks,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn document_path(&self, collection: Collection, language: Language) -> PathBuf {
        self.data_dir.join(collection.file_name(language))
    }

    fn write_lock(&self, collection: Collection) -> &Mutex<()> {
        // Every collection is inserted in `new`.
        &self.write_locks[&collection]
    }

    /// Load one language partition of `R`'s collection.
    async fn load<R: RepoRecord>(&self, language: Language) -> Result<Partition<R>, StorageError> {
        let path = self.document_path(R::COLLECTION, language);
        let document = read_document(&path).await?;
        let (records, undecodable) = decode_records::<R>(&document, language);
        Ok(Partition {
            document,
            records,
            undecodable,
        })
    }

    /// Write the partition's records back into its document and persist it
    /// atomically. Items that failed to decode are written back untouched.
    async fn store<R: RepoRecord>(
        &self,
        language: Language,
        partition: Partition<R>,
    ) -> Result<(), StorageError> {
        let Partition {
            mut document,
            records,
            undecodable,
        } = partition;
        let mut items = Vec::with_capacity(records.len() + undecodable.len());
        for record in &records {
            items.push(serde_json::to_value(record)?);
        }
        items.extend(undecodable);

        let key = R::COLLECTION.document_key();
        document.insert(key.to_string(), Value::Array(items));
        let path = self.document_path(R::COLLECTION, language);
        write_document(&path, &document).await
    }
}

/// One `(collection, language)` document split into its decoded records and
/// the raw items that could not be decoded.
struct Partition<R> {
    document: Document,
    records: Vec<R>,
    undecodable: Vec<Value>,
}

impl<R: RepoRecord> Partition<R> {
    /// Next id for this partition. Undecodable items keep their ids reserved.
    fn next_id(&self) -> DbId {
        let decoded = self.records.iter().map(|r| r.meta().id);
        let raw = self
            .undecodable
            .iter()
            .filter_map(|item| item.get("id").and_then(Value::as_i64));
        decoded.chain(raw).max().unwrap_or(0) + 1
    }
}

/// Decode every record of the document, skipping the ones that fail.
///
/// A single malformed item must not take down the rest of the collection,
/// so failures are logged and handed back raw for the next write.
fn decode_records<R: RepoRecord>(document: &Document, language: Language) -> (Vec<R>, Vec<Value>) {
    let Some(Value::Array(items)) = document.get(R::COLLECTION.document_key()) else {
        return (Vec::new(), Vec::new());
    };
    let mut records = Vec::with_capacity(items.len());
    let mut undecodable = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<R>(item.clone()) {
            Ok(mut record) => {
                // The file a record lives in decides its language.
                record.meta_mut().language = language;
                records.push(record);
            }
            Err(err) => {
                tracing::warn!(
                    collection = %R::COLLECTION,
                    %language,
                    index,
                    error = %err,
                    "Skipping undecodable record in flat file",
                );
                undecodable.push(item.clone());
            }
        }
    }
    (records, undecodable)
}

async fn read_document(path: &Path) -> Result<Document, StorageError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Document::new()),
        Err(err) => Err(err.into()),
    }
}

/// Write to a sibling temp file, then rename over the target.
async fn write_document(path: &Path, document: &Document) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(document)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

fn slug_taken<R: RepoRecord>(records: &[R], slug: &str, except_id: Option<DbId>) -> bool {
    records
        .iter()
        .any(|r| r.meta().url_slug == slug && Some(r.meta().id) != except_id)
}

fn duplicate_slug<R: RepoRecord>(language: Language, slug: &str) -> StorageError {
    StorageError::DuplicateSlug {
        collection: R::COLLECTION,
        language,
        slug: slug.to_string(),
    }
}

impl StorageBackend for FlatFileBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::FlatFile
    }

    async fn list<R: RepoRecord>(&self, filter: &RecordFilter) -> Result<Vec<R>, StorageError> {
        let languages = match filter.language {
            Some(language) => vec![language],
            None => Language::ALL.to_vec(),
        };

        let mut records = Vec::new();
        for language in languages {
            let partition = self.load::<R>(language).await?;
            records.extend(
                partition
                    .records
                    .into_iter()
                    .filter(|r: &R| !filter.published_only || r.meta().published),
            );
        }
        R::sort(&mut records);
        Ok(records)
    }

    async fn find_by_id<R: RepoRecord>(
        &self,
        language: Language,
        id: DbId,
    ) -> Result<Option<R>, StorageError> {
        let partition = self.load::<R>(language).await?;
        Ok(partition.records.into_iter().find(|r| r.meta().id == id))
    }

    async fn find_by_slug<R: RepoRecord>(
        &self,
        language: Language,
        slug: &str,
    ) -> Result<Option<R>, StorageError> {
        let partition = self.load::<R>(language).await?;
        Ok(partition.records.into_iter().find(|r| r.meta().url_slug == slug))
    }

    async fn insert<R: RepoRecord>(&self, mut record: R) -> Result<R, StorageError> {
        let language = record.meta().language;
        let _guard = self.write_lock(R::COLLECTION).lock().await;

        let mut partition = self.load::<R>(language).await?;
        if slug_taken(&partition.records, &record.meta().url_slug, None) {
            return Err(duplicate_slug::<R>(language, &record.meta().url_slug));
        }

        let next_id = partition.next_id();
        record.meta_mut().id = next_id;
        partition.records.push(record.clone());
        self.store(language, partition).await?;

        tracing::debug!(collection = %R::COLLECTION, %language, id = next_id, "Record written to flat file");
        Ok(record)
    }

    async fn replace<R: RepoRecord>(&self, id: DbId, mut record: R) -> Result<Option<R>, StorageError> {
        let language = record.meta().language;
        let _guard = self.write_lock(R::COLLECTION).lock().await;

        let mut partition = self.load::<R>(language).await?;
        let records = &mut partition.records;
        let Some(position) = records.iter().position(|r| r.meta().id == id) else {
            return Ok(None);
        };
        if slug_taken(records, &record.meta().url_slug, Some(id)) {
            return Err(duplicate_slug::<R>(language, &record.meta().url_slug));
        }

        let meta = record.meta_mut();
        meta.id = id;
        meta.created_at = records[position].meta().created_at.or(meta.created_at);
        records[position] = record.clone();
        self.store(language, partition).await?;

        tracing::debug!(collection = %R::COLLECTION, %language, id, "Record replaced in flat file");
        Ok(Some(record))
    }

    async fn delete<R: RepoRecord>(
        &self,
        id: DbId,
        language: Option<Language>,
    ) -> Result<Vec<Language>, StorageError> {
        let languages = match language {
            Some(language) => vec![language],
            None => Language::ALL.to_vec(),
        };
        let _guard = self.write_lock(R::COLLECTION).lock().await;

        let mut removed = Vec::new();
        for language in languages {
            let mut partition = self.load::<R>(language).await?;
            let before = partition.records.len();
            partition.records.retain(|r| r.meta().id != id);
            if partition.records.len() != before {
                self.store(language, partition).await?;
                removed.push(language);
            }
        }
        Ok(removed)
    }
}
