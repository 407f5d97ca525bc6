//! Client-side response cache keyed by exact request path.
//!
//! This is a write-side consistency tool, not a read-through cache: the typed
//! client never consults it. After a successful write the caller patches the
//! affected entries so already-fetched views reflect the change without a
//! refetch. Entries never expire; explicit invalidation and [`clear_all`] are
//! the only removal paths.
//!
//! [`clear_all`]: ResponseCache::clear_all

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

#[derive(Debug, Default)]
struct CacheInner {
    map: HashMap<String, Value>,
}

/// Thread-safe cache of last-known decoded payloads.
///
/// Keys are the literal request paths (query string included) of prior GETs;
/// two paths that differ only in parameter order are distinct entries.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully decoded payload for an exact path, if any.
    pub async fn get(&self, path: &str) -> Option<Value> {
        let store = self.inner.read().await;
        store.map.get(path).cloned()
    }

    /// Overwrite the entry for an exact path. Used after a successful PUT so
    /// the edit is visible without a round trip.
    pub async fn update_entry(&self, path: impl Into<String>, value: Value) {
        let mut store = self.inner.write().await;
        store.map.insert(path.into(), value);
    }

    /// Append an item to a cached list entry. Used after a successful
    /// POST-create so the new record appears in already-cached range queries.
    /// A missing or non-list entry is left untouched.
    pub async fn add_item_to_list_entry(&self, path: &str, item: Value) {
        let mut store = self.inner.write().await;
        if let Some(Value::Array(items)) = store.map.get_mut(path) {
            items.push(item);
        }
    }

    /// Remove a single entry, forcing the next GET for that path to hit the
    /// network.
    pub async fn invalidate_entry(&self, path: &str) {
        let mut store = self.inner.write().await;
        store.map.remove(path);
    }

    /// Drop every entry. Called on logout.
    pub async fn clear_all(&self) {
        let mut store = self.inner.write().await;
        store.map.clear();
    }

    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
