//! Declarative page patches.
//!
//! Builders in [`super::pages`] turn a record into a [`PagePlan`];
//! [`apply_plan`] writes it to a [`PageDocument`]. Each patch lists
//! fallback selectors since page templates differ between languages and
//! page generations; the first selector present on the page wins.

use maud::Markup;

use super::document::{MetaKey, PageDocument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchAction {
    Text(String),
    /// Trusted markup, already escaped where needed.
    Html(String),
    Attr { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub selectors: &'static [&'static str],
    pub action: PatchAction,
}

/// Everything a loader rewrites on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagePlan {
    pub title: Option<String>,
    pub meta: Vec<(MetaKey, String)>,
    pub patches: Vec<Patch>,
}

impl PagePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn meta(mut self, key: MetaKey, content: impl Into<String>) -> Self {
        self.meta.push((key, content.into()));
        self
    }

    pub fn text(mut self, selectors: &'static [&'static str], text: impl Into<String>) -> Self {
        self.patches.push(Patch {
            selectors,
            action: PatchAction::Text(text.into()),
        });
        self
    }

    pub fn html(mut self, selectors: &'static [&'static str], markup: Markup) -> Self {
        self.patches.push(Patch {
            selectors,
            action: PatchAction::Html(markup.into_string()),
        });
        self
    }

    pub fn attr(
        mut self,
        selectors: &'static [&'static str],
        name: &'static str,
        value: impl Into<String>,
    ) -> Self {
        self.patches.push(Patch {
            selectors,
            action: PatchAction::Attr {
                name,
                value: value.into(),
            },
        });
        self
    }

    /// Patch for the first selector matching, if any.
    pub fn patch_for(&self, selector: &str) -> Option<&Patch> {
        self.patches
            .iter()
            .find(|p| p.selectors.contains(&selector))
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.meta.is_empty() && self.patches.is_empty()
    }
}

/// Result of applying a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    /// First selector of each patch whose element was not found.
    pub missed: Vec<&'static str>,
}

/// Write a plan to a page. Patches without a matching element are skipped.
pub fn apply_plan<D: PageDocument + ?Sized>(doc: &mut D, plan: &PagePlan) -> ApplyReport {
    if let Some(title) = &plan.title {
        doc.set_title(title);
    }
    for (key, content) in &plan.meta {
        doc.upsert_meta(*key, content);
    }

    let mut report = ApplyReport::default();
    for patch in &plan.patches {
        let Some(selector) = patch.selectors.iter().copied().find(|s| doc.exists(s)) else {
            let first = patch.selectors.first().copied().unwrap_or("");
            tracing::debug!(selector = first, "No element for patch");
            report.missed.push(first);
            continue;
        };

        match &patch.action {
            PatchAction::Text(text) => doc.set_text(selector, text),
            PatchAction::Html(html) => doc.set_html(selector, html),
            PatchAction::Attr { name, value } => doc.set_attr(selector, name, value),
        }
        report.applied += 1;
    }
    report
}

#[cfg(test)]
mod tests {
    use maud::html;

    use super::*;
    use crate::loader::document::MemoryDocument;

    #[test]
    fn first_present_selector_wins() {
        let mut doc = MemoryDocument::new("old")
            .with_element(".fallback")
            .with_element(".other");
        let plan = PagePlan::new()
            .title("new")
            .text(&[".primary", ".fallback", ".other"], "hello");

        let report = apply_plan(&mut doc, &plan);
        assert_eq!(report.applied, 1);
        assert_eq!(doc.title(), "new");
        assert_eq!(
            doc.element(".fallback").unwrap().text.as_deref(),
            Some("hello")
        );
        assert_eq!(doc.element(".other").unwrap().text, None);
    }

    #[test]
    fn missing_elements_are_reported_not_fatal() {
        let mut doc = MemoryDocument::new("t").with_element("img");
        let plan = PagePlan::new()
            .html(&[".body", "article"], html! { p { "x" } })
            .attr(&["img"], "src", "/a.jpg");

        let report = apply_plan(&mut doc, &plan);
        assert_eq!(report.applied, 1);
        assert_eq!(report.missed, vec![".body"]);
        assert_eq!(doc.element("img").unwrap().attrs["src"], "/a.jpg");
    }

    #[test]
    fn meta_tags_are_upserted() {
        let mut doc = MemoryDocument::new("t").with_meta(MetaKey::Name("description"), "old");
        let plan = PagePlan::new()
            .meta(MetaKey::Name("description"), "new")
            .meta(MetaKey::Property("og:type"), "article");

        apply_plan(&mut doc, &plan);
        assert_eq!(doc.meta(MetaKey::Name("description")), Some("new"));
        assert_eq!(doc.meta(MetaKey::Property("og:type")), Some("article"));
    }
}
