use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

struct CachedBody {
    body: String,
    /// `None` when the TTL is too large to represent; such entries never expire.
    expires_at: Option<Instant>,
}

impl CachedBody {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| expires_at > now)
    }
}

/// Time-bounded cache of successful upstream response bodies, keyed by the
/// full request URL (query string included).
#[derive(Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CachedBody>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body for `key` if it has not expired yet.
    pub async fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.body.clone())
    }

    pub async fn insert(&self, key: String, body: String, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.is_fresh(now));
        entries.insert(
            key,
            CachedBody {
                body,
                expires_at: now.checked_add(ttl),
            },
        );
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hit_before_expiry() {
        let cache = ResponseCache::new();
        cache
            .insert("k".to_string(), "body".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("k").await.as_deref(), Some("body"));
        assert_eq!(cache.get("other").await, None);
    }

    #[tokio::test]
    async fn test_zero_ttl_never_hits() {
        let cache = ResponseCache::new();
        cache
            .insert("k".to_string(), "body".to_string(), Duration::ZERO)
            .await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_insert_evicts_expired_entries() {
        let cache = ResponseCache::new();
        cache
            .insert("stale".to_string(), "a".to_string(), Duration::ZERO)
            .await;
        cache
            .insert("fresh".to_string(), "b".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_huge_ttl_does_not_overflow() {
        let cache = ResponseCache::new();
        cache
            .insert(
                "k".to_string(),
                "body".to_string(),
                Duration::from_secs(u64::MAX),
            )
            .await;
        assert_eq!(cache.get("k").await.as_deref(), Some("body"));

        cache
            .insert("other".to_string(), "b".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.len().await, 2);
    }
}
