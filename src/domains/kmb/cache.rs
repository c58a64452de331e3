//! Process-lifetime response cache for the large KMB collections.
//!
//! Only the three full collections are cached. Once a key is filled it is
//! never refreshed, and an error response is cached like any other. There is
//! no fill guard: concurrent first requests for a key may each fetch, and the
//! last insert wins.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::fetch::ApiFetcher;

/// The fixed set of cacheable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    RouteList,
    StopList,
    RouteStopList,
}

impl CacheKey {
    /// Stable name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RouteList => "route_list",
            Self::StopList => "stop_list",
            Self::RouteStopList => "route_stop_list",
        }
    }
}

/// A cached raw response.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub response: Arc<Value>,
    pub fetched_at: DateTime<Utc>,
}

/// Memoizes raw responses per `CacheKey`.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached response for `key`, fetching `url` on first use.
    pub async fn get_or_fetch(
        &self,
        key: CacheKey,
        url: &str,
        fetcher: &dyn ApiFetcher,
    ) -> Arc<Value> {
        if let Some(entry) = self.entries.read().await.get(&key) {
            debug!(
                "Cache hit for {} (fetched {})",
                key.as_str(),
                entry.fetched_at.to_rfc3339()
            );
            return entry.response.clone();
        }

        info!("Cache miss for {}, fetching {}", key.as_str(), url);
        let response = Arc::new(fetcher.fetch(url).await);

        self.entries.write().await.insert(
            key,
            CacheEntry {
                response: response.clone(),
                fetched_at: Utc::now(),
            },
        );

        response
    }

    /// Peek at an entry without fetching.
    pub async fn get(&self, key: CacheKey) -> Option<CacheEntry> {
        self.entries.read().await.get(&key).cloned()
    }

    /// When the most recent entry was filled.
    pub async fn last_update(&self) -> Option<DateTime<Utc>> {
        self.entries
            .read()
            .await
            .values()
            .map(|entry| entry.fetched_at)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::kmb::testing::StaticFetcher;
    use serde_json::json;

    const URL: &str = "http://test/route/";

    #[tokio::test]
    async fn test_second_call_is_memoized() {
        let fetcher = StaticFetcher::new().with(URL, json!({ "data": [] }));
        let cache = ResponseCache::new();

        let first = cache.get_or_fetch(CacheKey::RouteList, URL, &fetcher).await;
        let second = cache.get_or_fetch(CacheKey::RouteList, URL, &fetcher).await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.calls(URL), 1);
    }

    #[tokio::test]
    async fn test_error_response_is_cached() {
        let fetcher = StaticFetcher::new();
        let cache = ResponseCache::new();

        let first = cache.get_or_fetch(CacheKey::StopList, URL, &fetcher).await;
        assert!(first.get("error").is_some());

        let again = cache.get_or_fetch(CacheKey::StopList, URL, &fetcher).await;
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(fetcher.calls(URL), 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let fetcher = StaticFetcher::new()
            .with("http://test/a", json!({ "data": ["a"] }))
            .with("http://test/b", json!({ "data": ["b"] }));
        let cache = ResponseCache::new();

        assert!(cache.get(CacheKey::RouteList).await.is_none());
        assert!(cache.last_update().await.is_none());

        let a = cache
            .get_or_fetch(CacheKey::RouteList, "http://test/a", &fetcher)
            .await;
        let b = cache
            .get_or_fetch(CacheKey::RouteStopList, "http://test/b", &fetcher)
            .await;

        assert_eq!(a["data"][0], "a");
        assert_eq!(b["data"][0], "b");
        assert!(cache.get(CacheKey::StopList).await.is_none());
        assert!(cache.last_update().await.is_some());
    }
}
