//! The page surface loaders write to.

use std::collections::{BTreeMap, HashMap};

/// Addresses a `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaKey {
    /// `<meta property="...">`, used by Open Graph.
    Property(&'static str),
    /// `<meta name="...">`, used by Twitter cards, description, keywords.
    Name(&'static str),
}

impl MetaKey {
    /// CSS selector of the tag.
    pub fn selector(self) -> String {
        match self {
            Self::Property(p) => format!("meta[property=\"{p}\"]"),
            Self::Name(n) => format!("meta[name=\"{n}\"]"),
        }
    }
}

/// A page that can be patched by CSS selector.
///
/// Implemented over a browser DOM binding in the site, and by
/// [`MemoryDocument`] for previews and tests. Setters act on the first
/// element matching the selector and are no-ops when nothing matches.
pub trait PageDocument {
    fn exists(&self, selector: &str) -> bool;

    fn set_text(&mut self, selector: &str, text: &str);

    /// Replace the element's children with trusted markup.
    fn set_html(&mut self, selector: &str, html: &str);

    fn set_attr(&mut self, selector: &str, name: &str, value: &str);

    fn set_title(&mut self, title: &str);

    /// Update the tag's content, creating it in `<head>` when missing.
    fn upsert_meta(&mut self, key: MetaKey, content: &str);
}

/// State of one element in a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: Option<String>,
    pub html: Option<String>,
    pub attrs: BTreeMap<String, String>,
}

/// Selector-addressed page held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    title: String,
    elements: HashMap<String, Element>,
    meta: BTreeMap<MetaKey, String>,
}

impl MemoryDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Declare an element the page contains.
    pub fn with_element(mut self, selector: &str) -> Self {
        self.elements.insert(selector.to_string(), Element::default());
        self
    }

    pub fn with_meta(mut self, key: MetaKey, content: &str) -> Self {
        self.meta.insert(key, content.to_string());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn element(&self, selector: &str) -> Option<&Element> {
        self.elements.get(selector)
    }

    pub fn meta(&self, key: MetaKey) -> Option<&str> {
        self.meta.get(&key).map(String::as_str)
    }
}

impl PageDocument for MemoryDocument {
    fn exists(&self, selector: &str) -> bool {
        self.elements.contains_key(selector)
    }

    fn set_text(&mut self, selector: &str, text: &str) {
        if let Some(element) = self.elements.get_mut(selector) {
            element.text = Some(text.to_string());
            element.html = None;
        }
    }

    fn set_html(&mut self, selector: &str, html: &str) {
        if let Some(element) = self.elements.get_mut(selector) {
            element.html = Some(html.to_string());
            element.text = None;
        }
    }

    fn set_attr(&mut self, selector: &str, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(selector) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn upsert_meta(&mut self, key: MetaKey, content: &str) {
        self.meta.insert(key, content.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_ignore_unknown_selectors() {
        let mut doc = MemoryDocument::new("Static").with_element("h1");
        doc.set_text(".missing", "x");
        doc.set_text("h1", "Dynamic");

        assert!(!doc.exists(".missing"));
        assert_eq!(doc.element("h1").unwrap().text.as_deref(), Some("Dynamic"));
    }

    #[test]
    fn meta_is_created_when_missing() {
        let mut doc = MemoryDocument::new("t");
        doc.upsert_meta(MetaKey::Property("og:title"), "Hello");
        assert_eq!(doc.meta(MetaKey::Property("og:title")), Some("Hello"));
        assert_eq!(
            MetaKey::Name("twitter:title").selector(),
            "meta[name=\"twitter:title\"]"
        );
    }
}
