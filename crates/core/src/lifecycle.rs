//! Write-path rules applied before a record is persisted.
//!
//! Both backends run records through these functions so that validation,
//! slug derivation and timestamping behave identically in relational and
//! flat-file mode.

use crate::content::ContentRecord;
use crate::error::CoreError;
use crate::slug::{slugify, validate_slug};
use crate::types::{DbId, Timestamp};

/// Prepare a record for insertion.
///
/// The id is cleared (the store assigns it), both timestamps are set to
/// `now`, and the slug is validated if supplied or derived from the label.
pub fn prepare_create<R: ContentRecord>(mut record: R, now: Timestamp) -> Result<R, CoreError> {
    validate_label(&record)?;
    record.apply_defaults();
    resolve_slug(&mut record)?;

    let meta = record.meta_mut();
    meta.id = 0;
    meta.created_at = Some(now);
    meta.updated_at = Some(now);
    Ok(record)
}

/// Prepare a full-record replacement of `id`.
///
/// The path id wins over any id in the body. `created_at` is left as given;
/// the store keeps the persisted value.
pub fn prepare_update<R: ContentRecord>(
    mut record: R,
    id: DbId,
    now: Timestamp,
) -> Result<R, CoreError> {
    validate_label(&record)?;
    record.apply_defaults();
    resolve_slug(&mut record)?;

    let meta = record.meta_mut();
    meta.id = id;
    meta.updated_at = Some(now);
    Ok(record)
}

fn validate_label<R: ContentRecord>(record: &R) -> Result<(), CoreError> {
    if record.label().trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{} is required",
            R::COLLECTION.label_field()
        )));
    }
    Ok(())
}

/// Keep an explicit slug (after validation) or derive one from the label.
fn resolve_slug<R: ContentRecord>(record: &mut R) -> Result<(), CoreError> {
    let supplied = record.meta().url_slug.trim().to_string();
    let slug = if supplied.is_empty() {
        let derived = slugify(record.label());
        if derived.is_empty() {
            return Err(CoreError::Validation(format!(
                "Cannot derive urlSlug from {} '{}'",
                R::COLLECTION.label_field(),
                record.label()
            )));
        }
        derived
    } else {
        validate_slug(&supplied)?;
        supplied
    };
    record.meta_mut().url_slug = slug;
    Ok(())
}
