pub mod content;
pub mod health;

use axum::routing::get;
use axum::Router;
use heritage_core::content::{Banner, HeritageFigure, NewsArticle, Podcast, WellnessTip};

use crate::handlers::{content as content_handlers, status};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy, for each collection `c` in
/// `news`, `tips`, `figures`, `podcasts`, `banners`:
///
/// ```text
/// /{c}, /{c}-en                          published records (public, ?lang=)
/// /admin/{c}, /admin/{c}-en              all records, create (X-API-Key)
/// /admin/{c}/{id}                        replace, delete (X-API-Key)
///
/// /news/slug/{slug}[/en]                 published record by slug
/// /tips/slug/{slug}[/en]
/// /figures/slug/{slug}[/en]
///
/// /profiles, /profiles-en                alias of /figures, /figures-en
///
/// /status                                server, backend and cache summary
/// /health                                backend health
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(content::router::<NewsArticle>())
        .merge(content::router::<WellnessTip>())
        .merge(content::router::<HeritageFigure>())
        .merge(content::router::<Podcast>())
        .merge(content::router::<Banner>())
        .merge(content::slug_router::<NewsArticle>())
        .merge(content::slug_router::<WellnessTip>())
        .merge(content::slug_router::<HeritageFigure>())
        .route(
            "/profiles",
            get(content_handlers::list_public::<HeritageFigure>),
        )
        .route(
            "/profiles-en",
            get(content_handlers::list_public_en::<HeritageFigure>),
        )
        .route("/status", get(status::status))
        .route("/health", get(status::health))
}
