/// Record identifiers: BIGSERIAL in PostgreSQL, max+1 in the flat-file store.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
