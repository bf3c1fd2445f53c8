//! Short-TTL read-through cache for adapter responses.
//!
//! Keys are the adapter name plus its arguments. Only successful results are
//! stored. The lock is never held across the fetch, so two concurrent misses
//! on the same key both go upstream and the later write wins.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// A cloneable handle to a shared TTL map.
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, CacheEntry<V>>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Fresh cached value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<V> {
        let guard = self.entries.lock().ok()?;
        guard
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: &str, value: V) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
            guard.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.remove(key);
        }
    }

    /// Return the cached value, or run `fetch`, store a success and return it.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = fetch().await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}
