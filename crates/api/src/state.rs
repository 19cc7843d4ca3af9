use std::sync::Arc;

use heritage_core::cache::ContentCache;
use heritage_db::storage::ContentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Content storage: relational with flat-file fallback, or flat-file only.
    pub store: Arc<ContentStore>,
    /// Listing cache. Always present; a disabled instance always misses.
    pub cache: Arc<ContentCache>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: ContentStore, cache: ContentCache, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }
}
