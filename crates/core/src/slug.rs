//! URL slug generation and matching.
//!
//! Slugs are the public routing key of a record inside its language
//! partition. Vietnamese titles are folded to base ASCII letters first, so
//! "Nguyễn Tường Bách" becomes `nguyen-tuong-bach`.

use crate::error::CoreError;

/// Suffix carried by slugs of records migrated from the legacy static pages.
pub const HTML_SUFFIX: &str = ".html";

/// Maximum accepted slug length.
pub const MAX_SLUG_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a URL-safe slug from a record label.
///
/// Lower-cases, folds diacritics to their base letter, replaces every run of
/// other characters with a single hyphen, and trims leading/trailing hyphens.
/// The result matches `^[a-z0-9]+(-[a-z0-9]+)*$` or is empty.
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if is_combining_mark(c) {
            continue;
        }
        let folded = fold_char(c);
        if folded.is_ascii_alphanumeric() {
            if pending_hyphen && !result.is_empty() {
                result.push('-');
            }
            pending_hyphen = false;
            result.push(folded);
        } else {
            pending_hyphen = true;
        }
    }

    result
}

/// Map an accented lowercase letter to its ASCII base letter.
///
/// Characters without a mapping are returned unchanged.
fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ' | 'ấ'
        | 'ẩ' | 'ẫ' | 'ậ' | 'ä' | 'å' | 'ā' => 'a',
        'đ' | 'ð' => 'd',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' | 'ë' | 'ē' => 'e',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' | 'î' | 'ï' | 'ī' => 'i',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ' | 'ớ'
        | 'ở' | 'ỡ' | 'ợ' | 'ö' | 'ø' | 'ō' => 'o',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' | 'û' | 'ü' | 'ū' => {
            'u'
        }
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' | 'ÿ' => 'y',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Combining diacritical marks left over from decomposed (NFD) input.
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an explicitly supplied slug.
///
/// Accepts lowercase alphanumerics and single hyphens, optionally followed by
/// the legacy `.html` suffix.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("urlSlug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "urlSlug must not exceed {MAX_SLUG_LEN} characters"
        )));
    }
    let stem = slug.strip_suffix(HTML_SUFFIX).unwrap_or(slug);
    if !is_canonical(stem) {
        return Err(CoreError::Validation(format!(
            "urlSlug '{slug}' may only contain lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// True when `s` matches `^[a-z0-9]+(-[a-z0-9]+)*$`.
pub fn is_canonical(s: &str) -> bool {
    !s.is_empty()
        && s.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Whether a stored slug identifies the page slug taken from a URL.
///
/// Exact match first, then the `.html` suffix is added or stripped on either
/// side.
pub fn matches_page_slug(record_slug: &str, page_slug: &str) -> bool {
    if record_slug == page_slug {
        return true;
    }
    let record_stem = record_slug.strip_suffix(HTML_SUFFIX).unwrap_or(record_slug);
    let page_stem = page_slug.strip_suffix(HTML_SUFFIX).unwrap_or(page_slug);
    !record_stem.is_empty() && record_stem == page_stem
}
