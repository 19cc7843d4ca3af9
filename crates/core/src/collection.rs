//! Content collections and their naming conventions.
//!
//! One place maps a collection to its route segment, document key, file
//! name, and table, so no other module spells these strings out.

use std::fmt;

use crate::language::Language;

/// One content type published on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    News,
    Tips,
    Figures,
    Podcasts,
    Banners,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::News,
        Collection::Tips,
        Collection::Figures,
        Collection::Podcasts,
        Collection::Banners,
    ];

    /// Route segment under `/api` (`/api/tips`, `/api/admin/tips`).
    pub fn path(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Tips => "tips",
            Self::Figures => "figures",
            Self::Podcasts => "podcasts",
            Self::Banners => "banners",
        }
    }

    /// Top-level key of the JSON document and of list responses.
    pub fn document_key(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Tips => "wellnessTips",
            Self::Figures => "heritageFigures",
            Self::Podcasts => "podcasts",
            Self::Banners => "banners",
        }
    }

    /// Flat-file document name for one language partition.
    pub fn file_name(self, language: Language) -> String {
        let stem = match self {
            Self::News => "news",
            Self::Tips => "wellness-tips",
            Self::Figures => "heritage-figures",
            Self::Podcasts => "podcasts",
            Self::Banners => "banners",
        };
        format!("{stem}{}.json", language.route_suffix())
    }

    /// Relational table holding every language of this collection.
    pub fn table(self) -> &'static str {
        match self {
            Self::News => "news_articles",
            Self::Tips => "wellness_tips",
            Self::Figures => "heritage_figures",
            Self::Podcasts => "podcasts",
            Self::Banners => "banners",
        }
    }

    /// Human-readable singular name used in error and log messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::News => "News article",
            Self::Tips => "Wellness tip",
            Self::Figures => "Heritage figure",
            Self::Podcasts => "Podcast",
            Self::Banners => "Banner",
        }
    }

    /// API field carrying the record's primary label.
    pub fn label_field(self) -> &'static str {
        match self {
            Self::Figures => "fullName",
            _ => "title",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_language_suffix() {
        assert_eq!(Collection::News.file_name(Language::Vi), "news.json");
        assert_eq!(
            Collection::Figures.file_name(Language::En),
            "heritage-figures-en.json"
        );
        assert_eq!(
            Collection::Tips.file_name(Language::En),
            "wellness-tips-en.json"
        );
    }

    #[test]
    fn document_keys_are_pluralized_collection_names() {
        assert_eq!(Collection::Tips.document_key(), "wellnessTips");
        assert_eq!(Collection::Figures.document_key(), "heritageFigures");
        assert_eq!(Collection::Banners.document_key(), "banners");
    }

    #[test]
    fn figures_are_labelled_by_full_name() {
        assert_eq!(Collection::Figures.label_field(), "fullName");
        assert_eq!(Collection::Podcasts.label_field(), "title");
    }
}
