//! Supported content languages.
//!
//! Every record belongs to exactly one language partition. Vietnamese is the
//! site's primary language and the default whenever none is given.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A language partition of a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Vi,
    En,
}

impl Language {
    /// Both partitions, primary language first.
    pub const ALL: [Language; 2] = [Language::Vi, Language::En];

    /// ISO 639-1 code stored in the `language` column.
    pub fn code(self) -> &'static str {
        match self {
            Self::Vi => "vi",
            Self::En => "en",
        }
    }

    /// Suffix appended to route and file names for this language.
    ///
    /// The primary language carries no suffix: `/api/news` vs `/api/news-en`.
    pub fn route_suffix(self) -> &'static str {
        match self {
            Self::Vi => "",
            Self::En => "-en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vi" => Ok(Self::Vi),
            "en" => Ok(Self::En),
            other => Err(CoreError::Validation(format!(
                "Unknown language '{other}'. Must be one of: vi, en"
            ))),
        }
    }
}
