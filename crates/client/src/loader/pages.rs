//! Page plans for each public page type.

use heritage_core::content::{
    Banner, ContentRecord, HeritageFigure, NewsArticle, Podcast, SectionBody, WellnessTip,
};
use heritage_core::language::Language;
use maud::{html, Markup, PreEscaped};

use super::document::MetaKey;
use super::plan::PagePlan;

const SITE_NAME: &str = "Living Heritage";

/// Records that have their own detail page.
pub trait DetailPage: ContentRecord {
    fn page_plan(&self) -> PagePlan;
}

/// `hqdefault` thumbnail of a YouTube video.
pub fn youtube_thumbnail(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}

/// Autoplaying embed URL swapped in when a thumbnail is clicked.
pub fn youtube_embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{video_id}?rel=0&modestbranding=1&playsinline=1&autoplay=1"
    )
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("")
}

/// Title, description and image tags shared by every detail page.
fn social_meta(plan: PagePlan, title: &str, description: &str, image: &str) -> PagePlan {
    plan.meta(MetaKey::Name("description"), description)
        .meta(MetaKey::Property("og:title"), title)
        .meta(MetaKey::Property("og:description"), description)
        .meta(MetaKey::Property("og:image"), image)
        .meta(MetaKey::Property("og:type"), "article")
        .meta(MetaKey::Name("twitter:title"), title)
        .meta(MetaKey::Name("twitter:description"), description)
        .meta(MetaKey::Name("twitter:image"), image)
}

// ---------------------------------------------------------------------------
// Heritage figures
// ---------------------------------------------------------------------------

fn quote_label(language: Language) -> &'static str {
    match language {
        Language::Vi => "TRÍCH DẪN",
        Language::En => "QUOTE",
    }
}

fn figure_body(figure: &HeritageFigure) -> Markup {
    html! {
        @if !figure.introduction.is_empty() {
            p { (figure.introduction) }
        }
        @for section in &figure.sections {
            p { strong { (section.title) } }
            @match &section.body {
                SectionBody::List { items } => {
                    ul {
                        @for item in items {
                            li { (item) }
                        }
                    }
                }
                SectionBody::Text { content } => {
                    @if !content.is_empty() {
                        p { (content) }
                    }
                }
            }
        }
    }
}

fn figure_sidebar(figure: &HeritageFigure) -> Markup {
    html! {
        @if !figure.quote.is_empty() {
            div.profile-content-section-quote {
                p.quote-title { (quote_label(figure.meta.language)) }
                p { (figure.quote) }
            }
            div.line {}
        }
        @for highlight in &figure.highlights {
            div.content-highlight {
                p.highlight-title { (highlight.question) }
                div.highlight-detail {
                    @for paragraph in highlight.answer.as_slice() {
                        p { (paragraph) }
                    }
                }
            }
        }
    }
}

impl DetailPage for HeritageFigure {
    fn page_plan(&self) -> PagePlan {
        let title = if self.title.is_empty() {
            format!("{} | {SITE_NAME}", self.full_name)
        } else {
            format!("{} - {} | {SITE_NAME}", self.full_name, self.title)
        };
        let hero = first_non_empty(&[self.hero_image_url.as_str(), self.image_url.as_str()]);
        let description = first_non_empty(&[
            self.introduction.as_str(),
            self.summary.first().map(String::as_str).unwrap_or(""),
        ]);

        let plan = social_meta(PagePlan::new().title(&title), &title, description, hero);
        plan.attr(&[".hero-section .hero-media", ".hero-section img"], "src", hero)
            .attr(
                &[".hero-section .hero-media", ".hero-section img"],
                "alt",
                &self.full_name,
            )
            .text(&[".hero-section .hero-category"], &self.category)
            .text(
                &[".hero-section .hero-title", ".hero-section h1", "h1"],
                &self.full_name,
            )
            .text(&[".profile-header .profile-title"], &self.header_letter)
            .html(
                &[".profile-header .profile-summary"],
                html! {
                    @for paragraph in &self.summary {
                        p { (paragraph) }
                    }
                },
            )
            .html(&[".profile-content-body"], figure_body(self))
            .html(&[".profile-highlights", ".col-lg-4"], figure_sidebar(self))
    }
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

impl DetailPage for NewsArticle {
    fn page_plan(&self) -> PagePlan {
        let title = format!("{} | {SITE_NAME}", self.title);
        let image = self.featured_image.as_str();

        let mut plan = social_meta(
            PagePlan::new().title(title),
            &self.title,
            &self.description,
            image,
        );
        if !self.keywords.is_empty() {
            plan = plan.meta(MetaKey::Name("keywords"), &self.keywords);
        }
        if !image.is_empty() {
            plan = plan
                .attr(
                    &[".news-hero-section", ".hero-section"],
                    "style",
                    format!("background-image: url('{image}')"),
                )
                .attr(&["[data-article-image]", ".news-featured-image"], "src", image)
                .attr(
                    &["[data-article-image]", ".news-featured-image"],
                    "alt",
                    &self.title,
                );
        }

        plan.text(
            &[".section-news-content-title h2", ".news-hero-section h1", "h1"],
            &self.title,
        )
        .html(
            &[".section-news-content-body", ".article-content", "[data-content]"],
            html! { (PreEscaped(&self.content)) },
        )
        .text(&["[data-article-author]"], &self.author)
        .text(
            &["[data-article-date]", "time", ".article-date"],
            first_non_empty(&[self.date.as_str(), self.published_time.as_str()]),
        )
        .text(&["[data-article-category]"], &self.category)
    }
}

// ---------------------------------------------------------------------------
// Wellness tips
// ---------------------------------------------------------------------------

impl DetailPage for WellnessTip {
    fn page_plan(&self) -> PagePlan {
        let title = format!("{} | {SITE_NAME} - Wellness Tips", self.title);
        let description = first_non_empty(&[self.description.as_str(), self.title.as_str()]);
        let image = first_non_empty(&[self.image_url.as_str(), self.hero_image_url.as_str()]);
        let alt = first_non_empty(&[self.alt_text.as_str(), self.title.as_str()]);

        let plan = social_meta(PagePlan::new().title(title), &self.title, description, image);
        plan.text(
            &[".section-tips-content-title h2", ".tips-hero-section h1", "h1"],
            &self.title,
        )
        .text(&["[data-description]", ".tip-description"], &self.description)
        .html(
            &[".section-tips-content-body", ".tip-content", "[data-content]"],
            html! { (PreEscaped(&self.content)) },
        )
        .attr(
            &[".tips-centered-image", ".tip-featured-image", "img[data-featured]"],
            "src",
            image,
        )
        .attr(
            &[".tips-centered-image", ".tip-featured-image", "img[data-featured]"],
            "alt",
            alt,
        )
        .attr(
            &[".tips-hero-section img", ".hero-section img"],
            "src",
            first_non_empty(&[self.hero_image_url.as_str(), self.image_url.as_str()]),
        )
    }
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// Podcast cards, newest first. An empty list leaves the static grid.
pub fn podcast_grid(podcasts: &[Podcast]) -> PagePlan {
    let mut podcasts: Vec<&Podcast> = podcasts.iter().filter(|p| p.meta.published).collect();
    if podcasts.is_empty() {
        return PagePlan::new();
    }
    podcasts.sort_by(|a, b| b.meta.created_at.cmp(&a.meta.created_at));

    let cards = html! {
        @for podcast in podcasts {
            @let thumbnail = if podcast.image_url.is_empty() {
                youtube_thumbnail(&podcast.video_id)
            } else {
                podcast.image_url.clone()
            };
            div class="col-md-4 mt-4" data-id=(podcast.meta.id) {
                div.video-thumbnail
                    data-video-id=(podcast.video_id)
                    data-embed-url=(youtube_embed_url(&podcast.video_id))
                    role="button"
                    tabindex="0"
                    aria-label=(podcast.title)
                {
                    img class="img-fluid rounded-3"
                        src=(thumbnail)
                        alt=(first_non_empty(&[podcast.alt_text.as_str(), podcast.title.as_str()]))
                        loading="lazy";
                    div.play-button { i.fas.fa-play {} }
                }
                div.podcast-info {
                    h3.podcast-title { (podcast.title) }
                }
            }
        }
    };

    PagePlan::new().html(&["#podcastsContainer", ".podcast-grid"], cards)
}

/// Homepage carousel slides in display order. An empty list leaves the
/// static slides.
pub fn banner_carousel(banners: &[Banner]) -> PagePlan {
    let mut banners: Vec<Banner> = banners
        .iter()
        .filter(|b| b.meta.published)
        .cloned()
        .collect();
    if banners.is_empty() {
        return PagePlan::new();
    }
    Banner::sort(&mut banners);

    let slides = html! {
        @for (index, banner) in banners.iter().enumerate() {
            div.carousel-item.active[index == 0] {
                @if banner.link_url.is_empty() {
                    img class="d-block w-100" src=(banner.image_url) alt=(banner.title);
                } @else {
                    a href=(banner.link_url) {
                        img class="d-block w-100" src=(banner.image_url) alt=(banner.title);
                    }
                }
                @if !banner.title.is_empty() {
                    div.carousel-caption { h2 { (banner.title) } }
                }
            }
        }
    };

    PagePlan::new().html(
        &["#bannerCarousel .carousel-inner", ".banner-carousel", "#heroBanners"],
        slides,
    )
}
