#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use heritage_core::cache::ContentCache;
use heritage_db::storage::{ContentStore, FlatFileBackend};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use heritage_api::config::ServerConfig;
use heritage_api::router::build_app_router;
use heritage_api::state::AppState;

/// Admin secret configured for every test app.
pub const TEST_API_KEY: &str = "test-admin-key";

/// Build a test `ServerConfig` in flat-file mode rooted at `data_dir`.
pub fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        use_database: false,
        use_cache: false,
        cache_ttl_secs: 300,
        admin_api_key: TEST_API_KEY.to_string(),
        database_url: String::new(),
        data_dir: data_dir.to_path_buf(),
        site_dir: data_dir.join("site"),
    }
}

/// Build state over a flat-file store in `dir` with the given cache.
pub fn test_state(dir: &TempDir, cache: ContentCache) -> AppState {
    let config = test_config(dir.path());
    let store = ContentStore::fallback_only(FlatFileBackend::new(
        config.data_dir.clone(),
    ));
    AppState::new(store, cache, config)
}

/// Build the full application router from existing state.
pub fn build_app(state: AppState) -> Router {
    let config = state.config.as_ref().clone();
    build_app_router(state, &config)
}

/// Flat-file app with the cache disabled.
pub fn build_test_app(dir: &TempDir) -> Router {
    build_app(test_state(dir, ContentCache::disabled()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn admin_request(method: Method, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-api-key", TEST_API_KEY)
        .body(body)
        .unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// GET with an explicit `X-API-Key` value.
pub async fn get_with_key(app: Router, uri: &str, key: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("x-api-key", key)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET with the configured admin key.
pub async fn get_admin(app: Router, uri: &str) -> Response<Body> {
    get_with_key(app, uri, TEST_API_KEY).await
}

/// POST JSON with the admin key.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = admin_request(Method::POST, uri, Body::from(body.to_string()));
    send(app, request).await
}

/// PUT JSON with the admin key.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = admin_request(Method::PUT, uri, Body::from(body.to_string()));
    send(app, request).await
}

/// DELETE with the admin key.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = admin_request(Method::DELETE, uri, Body::empty());
    send(app, request).await
}

/// POST JSON without any API key.
pub async fn post_json_anonymous(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}
