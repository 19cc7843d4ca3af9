//! Content records as exchanged over the API and stored in JSON documents.
//!
//! Field names serialize in camelCase. Shared identity, language, publication
//! and timestamp fields live in [`RecordMeta`], flattened into every record.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::collection::Collection;
use crate::language::Language;
use crate::types::{DbId, Timestamp};

/// Default byline for news articles.
pub const DEFAULT_AUTHOR: &str = "Living Heritage";

/// Default category for news articles.
pub const DEFAULT_NEWS_CATEGORY: &str = "News";

// ---------------------------------------------------------------------------
// Shared metadata
// ---------------------------------------------------------------------------

/// Fields common to every record of every collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    #[serde(default)]
    pub id: DbId,
    #[serde(default, alias = "slug", alias = "url_slug")]
    pub url_slug: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Behaviour shared by the five record types.
///
/// Storage backends and HTTP handlers are generic over this trait, so a
/// collection is added by defining its struct and implementing it once.
pub trait ContentRecord:
    Serialize + serde::de::DeserializeOwned + Clone + Send + Sync + 'static
{
    const COLLECTION: Collection;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// The primary label (title or full name) slugs are derived from.
    fn label(&self) -> &str;

    /// Fill collection-specific defaults before persisting.
    fn apply_defaults(&mut self) {}

    /// Order records the way listings present them: newest first.
    fn sort(records: &mut [Self]) {
        records.sort_by(|a, b| b.meta().created_at.cmp(&a.meta().created_at));
    }
}

// ---------------------------------------------------------------------------
// Highlight answers
// ---------------------------------------------------------------------------

/// One or more answer paragraphs of a Q&A highlight.
///
/// Accepts either a single string or an array on input. A single string is
/// split on line breaks with blank lines dropped, so internal code only ever
/// sees a list. Always serializes as an array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraphs(Vec<String>);

impl Paragraphs {
    pub fn new(paragraphs: Vec<String>) -> Self {
        Self(
            paragraphs
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }

    /// Split multi-line form text into paragraphs.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(str::to_string).collect())
    }

    /// Join paragraphs back into the multi-line text an edit form shows.
    pub fn to_text(&self) -> String {
        self.0.join("\n")
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Paragraphs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Paragraphs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawAnswer {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Option::<RawAnswer>::deserialize(deserializer)? {
            Some(RawAnswer::One(text)) => Paragraphs::from_text(&text),
            Some(RawAnswer::Many(list)) => Paragraphs::new(list),
            None => Paragraphs::default(),
        })
    }
}

/// A question/answer highlight shown in a figure's sidebar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: Paragraphs,
}

// ---------------------------------------------------------------------------
// Figure sections
// ---------------------------------------------------------------------------

/// Body of a figure section, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionBody {
    Text {
        #[serde(default)]
        content: String,
    },
    List {
        #[serde(default)]
        items: Vec<String>,
    },
}

/// A titled block of a figure's biography.
///
/// Sections without a `type`, or with one other than `list`, read as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureSection {
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

impl<'de> Deserialize<'de> for FigureSection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawSection {
            #[serde(default)]
            title: String,
            #[serde(default, rename = "type")]
            kind: Option<String>,
            #[serde(default)]
            content: Option<String>,
            #[serde(default)]
            items: Option<Vec<String>>,
        }

        let raw = RawSection::deserialize(deserializer)?;
        let body = match raw.kind.as_deref() {
            Some("list") => SectionBody::List {
                items: raw.items.unwrap_or_default(),
            },
            _ => SectionBody::Text {
                content: raw.content.unwrap_or_default(),
            },
        };
        Ok(FigureSection {
            title: raw.title,
            body,
        })
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeritageFigure {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Index letter for alphabetical listings.
    #[serde(default)]
    pub header_letter: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub small_image_url: String,
    #[serde(default)]
    pub hero_image_url: String,
    #[serde(default)]
    pub summary: Vec<String>,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub sections: Vec<FigureSection>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// HTML fragment.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, alias = "featured_image")]
    pub featured_image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub published_time: String,
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessTip {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// HTML fragment.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub hero_image_url: String,
    #[serde(default)]
    pub alt_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// YouTube video id.
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub alt_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub link_url: String,
    #[serde(default)]
    pub display_order: i32,
}

// ---------------------------------------------------------------------------
// ContentRecord impls
// ---------------------------------------------------------------------------

macro_rules! record_meta_accessors {
    () => {
        fn meta(&self) -> &RecordMeta {
            &self.meta
        }

        fn meta_mut(&mut self) -> &mut RecordMeta {
            &mut self.meta
        }
    };
}

impl ContentRecord for HeritageFigure {
    const COLLECTION: Collection = Collection::Figures;
    record_meta_accessors!();

    fn label(&self) -> &str {
        &self.full_name
    }

    fn apply_defaults(&mut self) {
        if self.header_letter.trim().is_empty() {
            if let Some(first) = self.full_name.trim().chars().next() {
                self.header_letter = first.to_uppercase().collect();
            }
        }
    }
}

impl ContentRecord for NewsArticle {
    const COLLECTION: Collection = Collection::News;
    record_meta_accessors!();

    fn label(&self) -> &str {
        &self.title
    }

    fn apply_defaults(&mut self) {
        if self.author.trim().is_empty() {
            self.author = DEFAULT_AUTHOR.to_string();
        }
        if self.category.trim().is_empty() {
            self.category = DEFAULT_NEWS_CATEGORY.to_string();
        }
    }
}

impl ContentRecord for WellnessTip {
    const COLLECTION: Collection = Collection::Tips;
    record_meta_accessors!();

    fn label(&self) -> &str {
        &self.title
    }
}

impl ContentRecord for Podcast {
    const COLLECTION: Collection = Collection::Podcasts;
    record_meta_accessors!();

    fn label(&self) -> &str {
        &self.title
    }
}

impl ContentRecord for Banner {
    const COLLECTION: Collection = Collection::Banners;
    record_meta_accessors!();

    fn label(&self) -> &str {
        &self.title
    }

    /// Banners are ordered by `displayOrder` ascending, then id.
    fn sort(records: &mut [Self]) {
        records.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(a.meta.id.cmp(&b.meta.id))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_string_is_split_into_paragraphs() {
        let h: Highlight =
            serde_json::from_value(json!({"question": "Q", "answer": "A\nB\nC"})).unwrap();
        assert_eq!(h.answer.as_slice(), ["A", "B", "C"]);
        assert_eq!(h.answer.to_text(), "A\nB\nC");
    }

    #[test]
    fn answer_array_round_trips_as_array() {
        let h: Highlight =
            serde_json::from_value(json!({"question": "Q", "answer": ["A", "B"]})).unwrap();
        assert_eq!(serde_json::to_value(&h).unwrap()["answer"], json!(["A", "B"]));
    }

    #[test]
    fn answer_blank_lines_are_dropped() {
        let p = Paragraphs::from_text("A\n\n  \nB\r\n");
        assert_eq!(p.as_slice(), ["A", "B"]);
    }

    #[test]
    fn missing_answer_is_empty() {
        let h: Highlight = serde_json::from_value(json!({"question": "Q"})).unwrap();
        assert!(h.answer.is_empty());
        let h: Highlight =
            serde_json::from_value(json!({"question": "Q", "answer": null})).unwrap();
        assert!(h.answer.is_empty());
    }

    #[test]
    fn sections_are_tagged_by_type() {
        let figure: HeritageFigure = serde_json::from_value(json!({
            "fullName": "Trần Văn Khê",
            "sections": [
                {"title": "Tiểu sử", "type": "text", "content": "Sinh năm 1921"},
                {"title": "Giải thưởng", "type": "list", "items": ["A", "B"]}
            ]
        }))
        .unwrap();

        assert_eq!(
            figure.sections[0].body,
            SectionBody::Text {
                content: "Sinh năm 1921".into()
            }
        );
        assert_eq!(
            figure.sections[1].body,
            SectionBody::List {
                items: vec!["A".into(), "B".into()]
            }
        );

        let back = serde_json::to_value(&figure).unwrap();
        assert_eq!(back["sections"][1]["type"], "list");
        assert_eq!(back["sections"][1]["items"], json!(["A", "B"]));
    }

    #[test]
    fn untagged_section_reads_as_text() {
        let figure: HeritageFigure = serde_json::from_value(json!({
            "fullName": "Trần Văn Khê",
            "sections": [
                {"title": "Tiểu sử", "content": "no type tag"},
                {"title": "Ghi chú", "type": "quote"},
                {"title": "Danh sách", "type": "list"}
            ]
        }))
        .unwrap();

        assert_eq!(figure.sections[0].title, "Tiểu sử");
        assert_eq!(
            figure.sections[0].body,
            SectionBody::Text {
                content: "no type tag".into()
            }
        );
        assert_eq!(
            figure.sections[1].body,
            SectionBody::Text {
                content: String::new()
            }
        );
        assert_eq!(figure.sections[2].body, SectionBody::List { items: vec![] });

        let back = serde_json::to_value(&figure).unwrap();
        assert_eq!(back["sections"][0]["type"], "text");
    }

    #[test]
    fn meta_is_flattened_in_camel_case() {
        let tip = WellnessTip {
            meta: RecordMeta {
                id: 7,
                url_slug: "tra-xanh".into(),
                published: true,
                ..RecordMeta::default()
            },
            title: "Trà xanh".into(),
            hero_image_url: "/img/hero.jpg".into(),
            ..WellnessTip::default()
        };
        let value = serde_json::to_value(&tip).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["urlSlug"], "tra-xanh");
        assert_eq!(value["language"], "vi");
        assert_eq!(value["heroImageUrl"], "/img/hero.jpg");
        assert!(value.get("meta").is_none());
    }

    #[test]
    fn legacy_news_fields_are_accepted() {
        let article: NewsArticle = serde_json::from_value(json!({
            "id": 3,
            "slug": "le-hoi",
            "title": "Lễ hội",
            "featured_image": "/img/a.jpg"
        }))
        .unwrap();
        assert_eq!(article.meta.url_slug, "le-hoi");
        assert_eq!(article.featured_image, "/img/a.jpg");
    }

    #[test]
    fn news_defaults_author_and_category() {
        let mut article = NewsArticle {
            title: "T".into(),
            ..NewsArticle::default()
        };
        article.apply_defaults();
        assert_eq!(article.author, DEFAULT_AUTHOR);
        assert_eq!(article.category, DEFAULT_NEWS_CATEGORY);
    }

    #[test]
    fn figure_header_letter_defaults_to_initial() {
        let mut figure = HeritageFigure {
            full_name: "đặng thái sơn".into(),
            ..HeritageFigure::default()
        };
        figure.apply_defaults();
        assert_eq!(figure.header_letter, "Đ");
    }

    #[test]
    fn banners_sort_by_display_order() {
        let mut banners: Vec<Banner> = [3, 1, 2]
            .into_iter()
            .map(|order| Banner {
                display_order: order,
                ..Banner::default()
            })
            .collect();
        Banner::sort(&mut banners);
        let orders: Vec<i32> = banners.iter().map(|b| b.display_order).collect();
        assert_eq!(orders, [1, 2, 3]);
    }
}
