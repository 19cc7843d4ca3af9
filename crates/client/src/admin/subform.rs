//! Repeatable sub-forms for a figure's highlights and sections.
//!
//! Each entry carries a panel-local [`EntryId`] so the matching "remove"
//! control can target it. On submit every entry becomes exactly one array
//! element, in display order.

use heritage_core::content::{FigureSection, Highlight, Paragraphs, SectionBody};
use heritage_core::language::Language;

/// Handle of one sub-form entry inside its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u32);

/// Ordered entries with add/remove controls.
#[derive(Debug, Clone, PartialEq)]
pub struct SubformList<T> {
    entries: Vec<(EntryId, T)>,
    next_id: u32,
}

impl<T> Default for SubformList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> SubformList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: T) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, entry));
        id
    }

    /// Remove an entry. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &T)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<T> for SubformList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for entry in iter {
            list.add(entry);
        }
        list
    }
}

/// Container element ids of the sub-form lists.
pub fn highlights_container(language: Language) -> &'static str {
    match language {
        Language::Vi => "highlightsContainer",
        Language::En => "highlightsContainerEn",
    }
}

pub fn sections_container(language: Language) -> &'static str {
    match language {
        Language::Vi => "sectionsContainer",
        Language::En => "sectionsContainerEn",
    }
}

// ---------------------------------------------------------------------------
// Highlights
// ---------------------------------------------------------------------------

/// One Q&A entry. The answer is edited as multi-line text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightEntry {
    pub question: String,
    pub answer_text: String,
}

impl From<&Highlight> for HighlightEntry {
    fn from(highlight: &Highlight) -> Self {
        Self {
            question: highlight.question.clone(),
            answer_text: highlight.answer.to_text(),
        }
    }
}

impl HighlightEntry {
    pub fn to_highlight(&self) -> Highlight {
        Highlight {
            question: self.question.trim().to_string(),
            answer: Paragraphs::from_text(&self.answer_text),
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionKind {
    #[default]
    Text,
    List,
}

/// One biography section. List items are edited one per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionEntry {
    pub title: String,
    pub kind: SectionKind,
    pub body_text: String,
}

impl From<&FigureSection> for SectionEntry {
    fn from(section: &FigureSection) -> Self {
        let (kind, body_text) = match &section.body {
            SectionBody::Text { content } => (SectionKind::Text, content.clone()),
            SectionBody::List { items } => (SectionKind::List, items.join("\n")),
        };
        Self {
            title: section.title.clone(),
            kind,
            body_text,
        }
    }
}

impl SectionEntry {
    pub fn to_section(&self) -> FigureSection {
        let body = match self.kind {
            SectionKind::Text => SectionBody::Text {
                content: self.body_text.trim().to_string(),
            },
            SectionKind::List => SectionBody::List {
                items: self
                    .body_text
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect(),
            },
        };
        FigureSection {
            title: self.title.trim().to_string(),
            body,
        }
    }
}
