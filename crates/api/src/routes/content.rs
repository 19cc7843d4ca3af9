//! Per-collection route trees, instantiated once per record type.

use axum::routing::{get, put};
use axum::Router;
use heritage_db::repositories::RepoRecord;

use crate::handlers::content;
use crate::state::AppState;

/// Listing and admin routes for `R`'s collection, relative to `/api`.
///
/// ```text
/// GET    /{c}                  -> list_public   (?lang=)
/// GET    /{c}-en               -> list_public_en
/// GET    /admin/{c}            -> list_admin    (?lang=, API key)
/// POST   /admin/{c}            -> create        (API key)
/// GET    /admin/{c}-en         -> list_admin_en (API key)
/// PUT    /admin/{c}/{id}       -> update        (API key)
/// DELETE /admin/{c}/{id}       -> delete        (?lang=, API key)
/// ```
pub fn router<R: RepoRecord>() -> Router<AppState> {
    let c = R::COLLECTION.path();
    Router::new()
        .route(&format!("/{c}"), get(content::list_public::<R>))
        .route(&format!("/{c}-en"), get(content::list_public_en::<R>))
        .route(
            &format!("/admin/{c}"),
            get(content::list_admin::<R>).post(content::create::<R>),
        )
        .route(&format!("/admin/{c}-en"), get(content::list_admin_en::<R>))
        .route(
            &format!("/admin/{c}/{{id}}"),
            put(content::update::<R>).delete(content::delete::<R>),
        )
}

/// Public single-record lookup by slug.
///
/// ```text
/// GET /{c}/slug/{slug}         -> get_by_slug
/// GET /{c}/slug/{slug}/en      -> get_by_slug_en
/// ```
pub fn slug_router<R: RepoRecord>() -> Router<AppState> {
    let c = R::COLLECTION.path();
    Router::new()
        .route(&format!("/{c}/slug/{{slug}}"), get(content::get_by_slug::<R>))
        .route(
            &format!("/{c}/slug/{{slug}}/en"),
            get(content::get_by_slug_en::<R>),
        )
}
