//! Row models for the content tables.
//!
//! Rows mirror the snake_case columns; `From<Row>` converts each into the
//! camelCase record type from `heritage_core::content`.

pub mod banner;
pub mod figure;
pub mod news;
pub mod podcast;
pub mod tip;

use heritage_core::language::Language;

/// Filter applied by every `find_all` query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Restrict to one language partition; `None` means both.
    pub language: Option<Language>,
    /// Only rows with `published = true`.
    pub published_only: bool,
}

impl RecordFilter {
    pub fn public(language: Language) -> Self {
        Self {
            language: Some(language),
            published_only: true,
        }
    }

    pub fn admin(language: Language) -> Self {
        Self {
            language: Some(language),
            published_only: false,
        }
    }

    /// Bind value for the nullable `$1::text` language parameter.
    pub(crate) fn language_code(&self) -> Option<&'static str> {
        self.language.map(Language::code)
    }
}

/// Parse a `language` column value. The column is CHECK-constrained to the
/// known codes, so anything else can only come from manual edits.
pub(crate) fn parse_language(code: &str) -> Language {
    code.parse().unwrap_or_else(|_| {
        tracing::warn!(code, "Unknown language code in row, treating as default");
        Language::default()
    })
}
