//! Short-lived quote cache keyed by instrument identifier
//!
//! Serves an immediate repaint when a symbol is reselected within the TTL.
//! Stale entries are ignored on read, never purged proactively.

use crate::quote::Quote;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default time-to-live for cached quotes
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
struct CacheEntry {
    quote: Quote,
    stored_at: Instant,
}

/// Thread-safe quote cache; clones share the same storage
#[derive(Debug, Clone)]
pub struct QuoteCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl QuoteCache {
    /// Create a cache with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a fresh quote for `id`
    pub async fn get(&self, id: &str) -> Option<Quote> {
        self.get_at(id, Instant::now()).await
    }

    /// Get a quote for `id` as seen at `now`
    ///
    /// Hit iff an entry exists and its age is strictly below the TTL.
    pub async fn get_at(&self, id: &str, now: Instant) -> Option<Quote> {
        let entries = self.entries.read().await;
        let entry = entries.get(id)?;
        let age = now.saturating_duration_since(entry.stored_at);
        if age < self.ttl {
            Some(entry.quote.clone())
        } else {
            None
        }
    }

    /// Insert or replace the quote for `id`, stamped now
    pub async fn put(&self, id: &str, quote: Quote) {
        self.put_at(id, quote, Instant::now()).await;
    }

    /// Insert or replace the quote for `id`, stamped at `at`
    pub async fn put_at(&self, id: &str, quote: Quote, at: Instant) {
        let mut entries = self.entries.write().await;
        entries.insert(
            id.to_string(),
            CacheEntry {
                quote,
                stored_at: at,
            },
        );
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of entries, including stale ones
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
