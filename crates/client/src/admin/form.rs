//! Create/edit forms bound to record JSON.
//!
//! Each collection has a binding table mapping record fields to the form
//! control ids of its Vietnamese and English modals. A [`RecordForm`] holds
//! the control values and converts them back into the full record payload.

use std::collections::BTreeMap;

use heritage_core::collection::Collection;
use heritage_core::content::{FigureSection, Highlight};
use heritage_core::language::Language;
use heritage_core::types::DbId;
use serde_json::{Map, Value};

use super::subform::{HighlightEntry, SectionEntry, SubformList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line input.
    Text,
    /// Multi-line input submitted verbatim.
    TextArea,
    /// Multi-line input submitted as an array of non-blank lines.
    Lines,
    Checkbox,
    Number,
}

/// One record field and the control ids editing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    pub field: &'static str,
    pub kind: FieldKind,
    pub vi_id: &'static str,
    pub en_id: &'static str,
}

impl FieldBinding {
    pub fn element_id(&self, language: Language) -> &'static str {
        match language {
            Language::Vi => self.vi_id,
            Language::En => self.en_id,
        }
    }
}

const fn bind(
    field: &'static str,
    kind: FieldKind,
    vi_id: &'static str,
    en_id: &'static str,
) -> FieldBinding {
    FieldBinding {
        field,
        kind,
        vi_id,
        en_id,
    }
}

use FieldKind::{Checkbox, Lines, Number, Text, TextArea};

const FIGURE_FIELDS: &[FieldBinding] = &[
    bind("fullName", Text, "profileName", "profileFullNameEn"),
    bind("title", Text, "profileTitle", "profileTitleEn"),
    bind("category", Text, "profileCategory", "profileCategoryEn"),
    bind("headerLetter", Text, "profileHeaderLetter", "profileHeaderLetterEn"),
    bind("imageUrl", Text, "profileImage", "profileImageEn"),
    bind("smallImageUrl", Text, "profileSmallImage", "profileSmallImageEn"),
    bind("heroImageUrl", Text, "profileHeroImage", "profileHeroImageEn"),
    bind("summary", Lines, "profileSummary", "profileSummaryEn"),
    bind("introduction", TextArea, "profileIntroduction", "profileIntroductionEn"),
    bind("quote", TextArea, "profileQuote", "profileQuoteEn"),
    bind("published", Checkbox, "profilePublished", "profilePublishedEn"),
];

const NEWS_FIELDS: &[FieldBinding] = &[
    bind("title", Text, "newsTitle", "newsTitleEn"),
    bind("description", TextArea, "newsDescription", "newsDescriptionEn"),
    bind("content", TextArea, "newsContent", "newsContentEn"),
    bind("category", Text, "newsCategory", "newsCategoryEn"),
    bind("author", Text, "newsAuthor", "newsAuthorEn"),
    bind("featuredImage", Text, "newsImage", "newsImageEn"),
    bind("date", Text, "newsDate", "newsDateEn"),
    bind("keywords", Text, "newsKeywords", "newsKeywordsEn"),
    bind("published", Checkbox, "newsPublished", "newsPublishedEn"),
];

const TIP_FIELDS: &[FieldBinding] = &[
    bind("title", Text, "tipTitle", "tipTitleEn"),
    bind("description", TextArea, "tipDescription", "tipDescriptionEn"),
    bind("content", TextArea, "tipContent", "tipContentEn"),
    bind("imageUrl", Text, "tipImage", "tipImageEn"),
    bind("heroImageUrl", Text, "tipHeroImage", "tipHeroImageEn"),
    bind("altText", Text, "tipAltText", "tipAltTextEn"),
    bind("published", Checkbox, "tipPublished", "tipPublishedEn"),
];

const PODCAST_FIELDS: &[FieldBinding] = &[
    bind("title", Text, "podcastTitle", "podcastTitleEn"),
    bind("description", TextArea, "podcastDescription", "podcastDescriptionEn"),
    bind("videoId", Text, "podcastVideoId", "podcastVideoIdEn"),
    bind("imageUrl", Text, "podcastImage", "podcastImageEn"),
    bind("altText", Text, "podcastAltText", "podcastAltTextEn"),
    bind("published", Checkbox, "podcastPublished", "podcastPublishedEn"),
];

const BANNER_FIELDS: &[FieldBinding] = &[
    bind("title", Text, "bannerTitle", "bannerTitleEn"),
    bind("imageUrl", Text, "bannerImage", "bannerImageEn"),
    bind("linkUrl", Text, "bannerLink", "bannerLinkEn"),
    bind("displayOrder", Number, "bannerPosition", "bannerPositionEn"),
    bind("published", Checkbox, "bannerActive", "bannerActiveEn"),
];

/// The binding table of a collection's form.
pub fn bindings(collection: Collection) -> &'static [FieldBinding] {
    match collection {
        Collection::Figures => FIGURE_FIELDS,
        Collection::News => NEWS_FIELDS,
        Collection::Tips => TIP_FIELDS,
        Collection::Podcasts => PODCAST_FIELDS,
        Collection::Banners => BANNER_FIELDS,
    }
}

/// Id of the `<form>` element, e.g. `profilesForm` / `profilesFormEn`.
pub fn form_id(collection: Collection, language: Language) -> String {
    let stem = match collection {
        Collection::Figures => "profiles",
        Collection::News => "news",
        Collection::Tips => "tips",
        Collection::Podcasts => "podcasts",
        Collection::Banners => "banners",
    };
    match language {
        Language::Vi => format!("{stem}Form"),
        Language::En => format!("{stem}FormEn"),
    }
}

/// A control's current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Flag(_) => "",
        }
    }

    pub fn as_flag(&self) -> bool {
        matches!(self, Self::Flag(true))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a whole number")]
    InvalidNumber(&'static str),

    #[error("Unknown form control '{0}'")]
    UnknownControl(String),

    #[error("Could not encode form: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Control values of one open create/edit modal.
#[derive(Debug, Clone)]
pub struct RecordForm {
    collection: Collection,
    language: Language,
    id: Option<DbId>,
    /// The edited record as loaded; fields without a control pass through.
    base: Map<String, Value>,
    values: BTreeMap<&'static str, FieldValue>,
    pub highlights: SubformList<HighlightEntry>,
    pub sections: SubformList<SectionEntry>,
}

impl RecordForm {
    /// An empty form for creating a record.
    pub fn blank(collection: Collection, language: Language) -> Self {
        let values = bindings(collection)
            .iter()
            .map(|b| {
                let value = match b.kind {
                    Checkbox => FieldValue::Flag(false),
                    Number => FieldValue::Text("0".to_string()),
                    Text | TextArea | Lines => FieldValue::Text(String::new()),
                };
                (b.field, value)
            })
            .collect();

        Self {
            collection,
            language,
            id: None,
            base: Map::new(),
            values,
            highlights: SubformList::new(),
            sections: SubformList::new(),
        }
    }

    /// A form pre-populated from a record of the admin list.
    pub fn from_record(collection: Collection, language: Language, record: &Value) -> Self {
        let mut form = Self::blank(collection, language);
        form.id = record.get("id").and_then(Value::as_i64);
        if let Some(object) = record.as_object() {
            form.base = object.clone();
        }

        for binding in bindings(collection) {
            let raw = record.get(binding.field);
            let value = match binding.kind {
                // Records without the flag are drafts, as the server reads them.
                Checkbox => FieldValue::Flag(raw.and_then(Value::as_bool).unwrap_or(false)),
                Lines => FieldValue::Text(match raw {
                    Some(Value::Array(lines)) => lines
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join("\n"),
                    Some(other) => scalar_text(other),
                    None => String::new(),
                }),
                Number => FieldValue::Text(raw.map(scalar_text).unwrap_or_else(|| "0".into())),
                Text | TextArea => FieldValue::Text(raw.map(scalar_text).unwrap_or_default()),
            };
            form.values.insert(binding.field, value);
        }

        if collection == Collection::Figures {
            form.highlights = decode_list::<Highlight>(record, "highlights")
                .iter()
                .map(HighlightEntry::from)
                .collect();
            form.sections = decode_list::<FigureSection>(record, "sections")
                .iter()
                .map(SectionEntry::from)
                .collect();
        }

        form
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Id of the record being edited; `None` for a create form.
    pub fn id(&self) -> Option<DbId> {
        self.id
    }

    pub fn form_id(&self) -> String {
        form_id(self.collection, self.language)
    }

    /// Current value of a record field's control.
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Set a control by record field name.
    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<(), FormError> {
        let binding = bindings(self.collection)
            .iter()
            .find(|b| b.field == field)
            .ok_or_else(|| FormError::UnknownControl(field.to_string()))?;
        self.values.insert(binding.field, value);
        Ok(())
    }

    /// Set a control by element id, as an input event reports it.
    pub fn set_control(&mut self, element_id: &str, value: FieldValue) -> Result<(), FormError> {
        let binding = bindings(self.collection)
            .iter()
            .find(|b| b.element_id(self.language) == element_id)
            .ok_or_else(|| FormError::UnknownControl(element_id.to_string()))?;
        self.values.insert(binding.field, value);
        Ok(())
    }

    pub fn set_text(&mut self, field: &str, text: impl Into<String>) -> Result<(), FormError> {
        self.set(field, FieldValue::Text(text.into()))
    }

    pub fn set_flag(&mut self, field: &str, flag: bool) -> Result<(), FormError> {
        self.set(field, FieldValue::Flag(flag))
    }

    /// Client-side checks run before anything is sent.
    pub fn validate(&self) -> Result<(), FormError> {
        let label = self.collection.label_field();
        let label_value = self.values.get(label).map(FieldValue::as_text).unwrap_or("");
        if label_value.trim().is_empty() {
            return Err(FormError::Required(label));
        }

        for binding in bindings(self.collection) {
            if binding.kind == Number {
                self.number(binding)?;
            }
        }
        Ok(())
    }

    /// Build the full record payload for create or update.
    pub fn to_record(&self) -> Result<Value, FormError> {
        self.validate()?;

        let mut record = self.base.clone();
        for binding in bindings(self.collection) {
            let value = self.values.get(binding.field);
            let json = match binding.kind {
                Checkbox => Value::Bool(value.is_some_and(FieldValue::as_flag)),
                Number => Value::from(self.number(binding)?),
                Lines => Value::from(
                    value
                        .map(FieldValue::as_text)
                        .unwrap_or("")
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_string)
                        .collect::<Vec<_>>(),
                ),
                Text => Value::from(value.map(FieldValue::as_text).unwrap_or("").trim()),
                TextArea => Value::from(value.map(FieldValue::as_text).unwrap_or("")),
            };
            record.insert(binding.field.to_string(), json);
        }
        record.insert("language".into(), Value::from(self.language.code()));

        if self.collection == Collection::Figures {
            let highlights: Vec<Highlight> =
                self.highlights.iter().map(|(_, h)| h.to_highlight()).collect();
            let sections: Vec<FigureSection> =
                self.sections.iter().map(|(_, s)| s.to_section()).collect();
            record.insert("highlights".into(), serde_json::to_value(highlights)?);
            record.insert("sections".into(), serde_json::to_value(sections)?);
        }

        Ok(Value::Object(record))
    }

    fn number(&self, binding: &FieldBinding) -> Result<i64, FormError> {
        let text = self
            .values
            .get(binding.field)
            .map(FieldValue::as_text)
            .unwrap_or("")
            .trim();
        if text.is_empty() {
            return Ok(0);
        }
        text.parse()
            .map_err(|_| FormError::InvalidNumber(binding.field))
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn decode_list<T: serde::de::DeserializeOwned>(record: &Value, key: &str) -> Vec<T> {
    match record.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(raw) => serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Ignoring malformed sub-form data");
            Vec::new()
        }),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn element_ids_are_language_keyed() {
        let name = &bindings(Collection::Figures)[0];
        assert_eq!(name.field, "fullName");
        assert_eq!(name.element_id(Language::Vi), "profileName");
        assert_eq!(name.element_id(Language::En), "profileFullNameEn");
        assert_eq!(form_id(Collection::Tips, Language::En), "tipsFormEn");
    }

    #[test]
    fn every_collection_binds_its_label_and_published() {
        for collection in Collection::ALL {
            let fields: Vec<_> = bindings(collection).iter().map(|b| b.field).collect();
            assert!(fields.contains(&collection.label_field()), "{collection}");
            assert!(fields.contains(&"published"), "{collection}");
        }
    }

    #[test]
    fn blank_form_requires_label() {
        let form = RecordForm::blank(Collection::Figures, Language::Vi);
        assert_matches!(form.validate(), Err(FormError::Required("fullName")));
        assert_matches!(form.to_record(), Err(FormError::Required("fullName")));
    }

    #[test]
    fn create_payload_from_controls() {
        let mut form = RecordForm::blank(Collection::Tips, Language::En);
        form.set_control("tipTitleEn", FieldValue::Text("  Breathe  ".into()))
            .unwrap();
        form.set_flag("published", true).unwrap();

        let record = form.to_record().unwrap();
        assert_eq!(record["title"], "Breathe");
        assert_eq!(record["language"], "en");
        assert_eq!(record["published"], true);
        assert!(record.get("id").is_none());
        assert!(record.get("urlSlug").is_none());
    }

    #[test]
    fn vietnamese_control_ids_are_rejected_on_english_form() {
        let mut form = RecordForm::blank(Collection::Tips, Language::En);
        assert_matches!(
            form.set_control("tipTitle", FieldValue::Text("x".into())),
            Err(FormError::UnknownControl(_))
        );
    }

    #[test]
    fn edit_form_round_trips_record() {
        let record = json!({
            "id": 4,
            "urlSlug": "nghe-nhan-a",
            "language": "vi",
            "fullName": "Nghệ nhân A",
            "summary": ["Một", "Hai"],
            "createdAt": "2024-05-01T00:00:00Z",
            "highlights": [{"question": "Q", "answer": ["A", "B"]}],
            "sections": [{"title": "S", "type": "list", "items": ["x", "y"]}]
        });
        let form = RecordForm::from_record(Collection::Figures, Language::Vi, &record);

        assert_eq!(form.id(), Some(4));
        assert_eq!(form.value("summary").unwrap().as_text(), "Một\nHai");
        assert_eq!(form.highlights.len(), 1);
        assert_eq!(form.sections.len(), 1);

        let payload = form.to_record().unwrap();
        assert_eq!(payload["urlSlug"], "nghe-nhan-a");
        assert_eq!(payload["createdAt"], "2024-05-01T00:00:00Z");
        assert_eq!(payload["summary"], json!(["Một", "Hai"]));
        assert_eq!(payload["highlights"], record["highlights"]);
        assert_eq!(payload["sections"], record["sections"]);
    }

    #[test]
    fn missing_published_flag_reads_as_draft() {
        let record = json!({"id": 2, "urlSlug": "tra-xanh", "title": "Trà xanh"});
        let form = RecordForm::from_record(Collection::Tips, Language::Vi, &record);
        assert!(!form.value("published").unwrap().as_flag());
        assert_eq!(form.to_record().unwrap()["published"], false);

        let record = json!({"id": 3, "title": "Trà gừng", "published": true});
        let form = RecordForm::from_record(Collection::Tips, Language::Vi, &record);
        assert!(form.value("published").unwrap().as_flag());
    }

    #[test]
    fn highlight_entries_map_one_to_one() {
        let mut form = RecordForm::blank(Collection::Figures, Language::Vi);
        form.set_text("fullName", "B").unwrap();
        form.highlights.add(HighlightEntry {
            question: "Q1".into(),
            answer_text: "A\nB\nC".into(),
        });
        let removed = form.highlights.add(HighlightEntry::default());
        form.highlights.add(HighlightEntry {
            question: "Q3".into(),
            answer_text: "D".into(),
        });
        form.highlights.remove(removed);

        let payload = form.to_record().unwrap();
        assert_eq!(
            payload["highlights"],
            json!([
                {"question": "Q1", "answer": ["A", "B", "C"]},
                {"question": "Q3", "answer": ["D"]}
            ])
        );
    }

    #[test]
    fn banner_order_must_be_numeric() {
        let mut form = RecordForm::blank(Collection::Banners, Language::Vi);
        form.set_text("title", "Hero").unwrap();
        form.set_text("displayOrder", "first").unwrap();
        assert_matches!(form.validate(), Err(FormError::InvalidNumber("displayOrder")));

        form.set_text("displayOrder", " 2 ").unwrap();
        assert_eq!(form.to_record().unwrap()["displayOrder"], 2);
    }
}
