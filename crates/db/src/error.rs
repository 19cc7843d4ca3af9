use heritage_core::collection::Collection;
use heritage_core::error::CoreError;
use heritage_core::language::Language;

/// Failure of a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("urlSlug '{slug}' already exists in {collection} ({language})")]
    DuplicateSlug {
        collection: Collection,
        language: Language,
        slug: String,
    },

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Whether the error means the backend itself cannot be reached, as
    /// opposed to a single statement being rejected.
    pub fn is_connectivity(&self) -> bool {
        match self {
            StorageError::Database(err) => matches!(
                err,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
                    | sqlx::Error::Protocol(_)
            ),
            StorageError::Unavailable(_) => true,
            _ => false,
        }
    }

    /// Whether another backend may retry the operation. Constraint
    /// violations are the caller's fault and must surface unchanged.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, StorageError::DuplicateSlug { .. })
    }

    /// Attach the offending language and slug to a duplicate-slug error
    /// raised by the database, which only reports the constraint name.
    pub(crate) fn with_slug(self, language: Language, slug: &str) -> Self {
        match self {
            StorageError::DuplicateSlug { collection, .. } => StorageError::DuplicateSlug {
                collection,
                language,
                slug: slug.to_string(),
            },
            other => other,
        }
    }
}

/// Unique-constraint violations on `(language, url_slug)` become
/// [`StorageError::DuplicateSlug`]; everything else is kept as-is.
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or_default();
                if let Some(collection) = collection_for_constraint(constraint) {
                    return StorageError::DuplicateSlug {
                        collection,
                        language: Language::default(),
                        slug: String::new(),
                    };
                }
            }
        }
        StorageError::Database(err)
    }
}

fn collection_for_constraint(constraint: &str) -> Option<Collection> {
    Collection::ALL
        .into_iter()
        .find(|c| constraint == format!("uq_{}_language_url_slug", c.table()))
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateSlug {
                collection,
                language,
                slug,
            } => {
                let message = if slug.is_empty() {
                    format!("urlSlug already exists in {collection}")
                } else {
                    format!("urlSlug '{slug}' already exists in {collection} ({language})")
                };
                CoreError::Validation(message)
            }
            other if other.is_connectivity() => CoreError::BackendUnavailable(other.to_string()),
            other => CoreError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pool_timeout_is_connectivity() {
        assert!(StorageError::Database(sqlx::Error::PoolTimedOut).is_connectivity());
        assert!(StorageError::Unavailable("down".into()).is_connectivity());
    }

    #[test]
    fn row_not_found_is_not_connectivity() {
        assert!(!StorageError::Database(sqlx::Error::RowNotFound).is_connectivity());
    }

    #[test]
    fn duplicate_slug_is_not_recoverable() {
        let err = StorageError::DuplicateSlug {
            collection: Collection::Tips,
            language: Language::En,
            slug: "test-tip".into(),
        };
        assert!(!err.is_recoverable());
        assert_matches!(CoreError::from(err), CoreError::Validation(msg) if msg.contains("test-tip"));
    }

    #[test]
    fn constraint_names_resolve_to_collections() {
        assert_eq!(
            collection_for_constraint("uq_wellness_tips_language_url_slug"),
            Some(Collection::Tips)
        );
        assert_eq!(collection_for_constraint("uq_other"), None);
    }

    #[test]
    fn connectivity_maps_to_backend_unavailable() {
        let err = StorageError::Unavailable("refused".into());
        assert_matches!(CoreError::from(err), CoreError::BackendUnavailable(_));
    }
}
