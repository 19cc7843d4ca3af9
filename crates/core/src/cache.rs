//! Read-through cache for public and admin collection listings.
//!
//! Keys are `(collection, language, published_only)`. Values are the JSON
//! payload the handler would otherwise rebuild from the store. A disabled
//! cache stores nothing and always misses, so every caller must already be
//! correct without it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::collection::Collection;
use crate::language::Language;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub collection: Collection,
    pub language: Language,
    pub published_only: bool,
}

impl CacheKey {
    pub fn new(collection: Collection, language: Language, published_only: bool) -> Self {
        Self {
            collection,
            language,
            published_only,
        }
    }

    /// Every key a write to `collection` can make stale.
    pub fn all_for(collection: Collection) -> impl Iterator<Item = CacheKey> {
        Language::ALL.into_iter().flat_map(move |language| {
            [true, false]
                .into_iter()
                .map(move |published_only| CacheKey::new(collection, language, published_only))
        })
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

#[derive(Debug)]
pub struct ContentCache {
    enabled: bool,
    default_ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl ContentCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            enabled: true,
            default_ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            default_ttl: DEFAULT_TTL,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Cached value for `key`, or `None` on miss or expiry.
    pub async fn get(&self, key: &CacheKey) -> Option<Value> {
        if !self.enabled {
            return None;
        }
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`. Concurrent populates race; the last one wins.
    pub async fn set(&self, key: CacheKey, value: Value, ttl: Duration) {
        if !self.enabled {
            return;
        }
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }

    pub async fn invalidate(&self, key: &CacheKey) {
        if !self.enabled {
            return;
        }
        self.entries.write().await.remove(key);
    }

    /// Drop both languages and both publish-filter variants of `collection`.
    pub async fn invalidate_collection(&self, collection: Collection) {
        if !self.enabled {
            return;
        }
        let mut entries = self.entries.write().await;
        for key in CacheKey::all_for(collection) {
            entries.remove(&key);
        }
        tracing::debug!(%collection, "Cache invalidated");
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|e| !e.is_expired()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(collection: Collection, language: Language, published_only: bool) -> CacheKey {
        CacheKey::new(collection, language, published_only)
    }

    #[tokio::test]
    async fn set_then_get_hits() {
        let cache = ContentCache::default();
        let k = key(Collection::Tips, Language::Vi, true);
        cache.set(k, json!({"wellnessTips": []}), DEFAULT_TTL).await;
        assert_eq!(cache.get(&k).await, Some(json!({"wellnessTips": []})));
    }

    #[tokio::test]
    async fn disabled_cache_always_misses() {
        let cache = ContentCache::disabled();
        let k = key(Collection::News, Language::En, true);
        cache.set(k, json!(1), DEFAULT_TTL).await;
        assert!(cache.get(&k).await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn expired_entry_is_a_miss() {
        let cache = ContentCache::default();
        let k = key(Collection::News, Language::Vi, false);
        cache.set(k, json!(1), Duration::ZERO).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(cache.get(&k).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_collection_clears_all_variants_only_for_that_collection() {
        let cache = ContentCache::default();
        for k in CacheKey::all_for(Collection::Figures) {
            cache.set(k, json!("figures"), DEFAULT_TTL).await;
        }
        let other = key(Collection::Podcasts, Language::Vi, true);
        cache.set(other, json!("podcasts"), DEFAULT_TTL).await;
        assert_eq!(cache.len().await, 5);

        cache.invalidate_collection(Collection::Figures).await;

        for k in CacheKey::all_for(Collection::Figures) {
            assert!(cache.get(&k).await.is_none());
        }
        assert_eq!(cache.get(&other).await, Some(json!("podcasts")));
    }

    #[tokio::test]
    async fn invalidate_single_key() {
        let cache = ContentCache::default();
        let a = key(Collection::Banners, Language::Vi, true);
        let b = key(Collection::Banners, Language::En, true);
        cache.set(a, json!(1), DEFAULT_TTL).await;
        cache.set(b, json!(2), DEFAULT_TTL).await;
        cache.invalidate(&a).await;
        assert!(cache.get(&a).await.is_none());
        assert_eq!(cache.get(&b).await, Some(json!(2)));
    }
}
