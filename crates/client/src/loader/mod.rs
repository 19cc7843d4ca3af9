//! Public page loaders.
//!
//! A loader fetches published records for the page's language, picks the
//! record whose slug matches the URL, and patches the static page with it.
//! A page whose slug has no record is left exactly as served.

pub mod document;
pub mod pages;
pub mod plan;

use std::sync::Arc;

use heritage_core::content::{Banner, ContentRecord, Podcast};
use heritage_core::language::Language;
use heritage_core::slug::matches_page_slug;

use crate::api::{decode_records, ContentGateway};
use crate::error::ClientError;

use self::document::PageDocument;
use self::pages::{banner_carousel, podcast_grid, DetailPage};
use self::plan::{apply_plan, ApplyReport, PagePlan};

/// Language of a page from its URL path: `/en/...` is English.
pub fn detect_language(path: &str) -> Language {
    if path.starts_with("/en/") {
        Language::En
    } else {
        Language::Vi
    }
}

/// Last path segment, e.g. `nghe-nhan-a.html` for `/en/profiles/nghe-nhan-a.html`.
///
/// Query strings and fragments are ignored.
pub fn page_slug(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    path.rsplit('/').next().unwrap_or("")
}

/// The record a page slug refers to.
pub fn find_record<'a, R: ContentRecord>(records: &'a [R], slug: &str) -> Option<&'a R> {
    if slug.is_empty() {
        return None;
    }
    records
        .iter()
        .find(|r| r.meta().url_slug == slug)
        .or_else(|| {
            records
                .iter()
                .find(|r| matches_page_slug(&r.meta().url_slug, slug))
        })
}

/// What a loader did to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied(ApplyReport),
    /// No record for the page slug; the page was left unchanged.
    NoMatch { slug: String },
    /// The API could not be reached; the page was left unchanged.
    Unavailable,
}

async fn fetch_published<G, R>(gateway: &G, language: Language) -> Result<Vec<R>, ClientError>
where
    G: ContentGateway,
    R: ContentRecord,
{
    let body = gateway.list_published(R::COLLECTION, language).await?;
    decode_records(&body)
}

/// Loads one figure, news or tip detail page.
pub struct DetailLoader<G> {
    gateway: Arc<G>,
}

impl<G: ContentGateway> DetailLoader<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Patch the page at `path` with its record.
    pub async fn load<R, D>(&self, path: &str, doc: &mut D) -> LoadOutcome
    where
        R: DetailPage,
        D: PageDocument + ?Sized,
    {
        let language = detect_language(path);
        let slug = page_slug(path);

        let records: Vec<R> = match fetch_published(self.gateway.as_ref(), language).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    collection = %R::COLLECTION,
                    %language,
                    error = %e,
                    "Failed to load records for page",
                );
                return LoadOutcome::Unavailable;
            }
        };

        match find_record(&records, slug) {
            Some(record) => {
                let report = apply_plan(doc, &record.page_plan());
                tracing::debug!(
                    collection = %R::COLLECTION,
                    slug,
                    applied = report.applied,
                    "Page loaded from record",
                );
                LoadOutcome::Applied(report)
            }
            None => {
                tracing::warn!(
                    collection = %R::COLLECTION,
                    %language,
                    slug,
                    "No record for page; keeping static content",
                );
                LoadOutcome::NoMatch {
                    slug: slug.to_string(),
                }
            }
        }
    }
}

/// Loads the podcast grid and the homepage banner carousel.
pub struct ListingLoader<G> {
    gateway: Arc<G>,
}

impl<G: ContentGateway> ListingLoader<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn podcasts<D: PageDocument + ?Sized>(&self, path: &str, doc: &mut D) -> LoadOutcome {
        self.load::<Podcast, D>(path, doc, podcast_grid).await
    }

    pub async fn banners<D: PageDocument + ?Sized>(&self, path: &str, doc: &mut D) -> LoadOutcome {
        self.load::<Banner, D>(path, doc, banner_carousel).await
    }

    async fn load<R, D>(&self, path: &str, doc: &mut D, build: fn(&[R]) -> PagePlan) -> LoadOutcome
    where
        R: ContentRecord,
        D: PageDocument + ?Sized,
    {
        let language = detect_language(path);
        let records: Vec<R> = match fetch_published(self.gateway.as_ref(), language).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(collection = %R::COLLECTION, error = %e, "Failed to load listing");
                return LoadOutcome::Unavailable;
            }
        };

        let plan = build(&records);
        if plan.is_empty() {
            tracing::warn!(collection = %R::COLLECTION, %language, "Nothing to show; keeping static content");
            return LoadOutcome::NoMatch {
                slug: page_slug(path).to_string(),
            };
        }
        LoadOutcome::Applied(apply_plan(doc, &plan))
    }
}
