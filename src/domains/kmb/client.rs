//! KMB API client: collection, detail and ETA accessors.
//!
//! Collections go through the shared `ResponseCache`; detail and ETA lookups
//! hit the network on every call. Every accessor degrades to an empty result
//! when the response has no `data` field.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::cache::{CacheKey, ResponseCache};
use super::endpoints::Endpoints;
use super::error::ApiError;
use super::fetch::{ApiFetcher, HttpFetcher};
use super::lookup;
use super::types::{Bound, Eta, Route, RouteStop, Stop, decode_items, decode_object};
use crate::core::config::ApiConfig;

/// Entry point to the KMB open-data API.
///
/// Cheap to clone; clones share the fetcher and the cache.
#[derive(Clone)]
pub struct KmbClient {
    fetcher: Arc<dyn ApiFetcher>,
    cache: Arc<ResponseCache>,
    endpoints: Endpoints,
}

impl KmbClient {
    /// Create a client from its parts.
    pub fn new(
        fetcher: Arc<dyn ApiFetcher>,
        cache: Arc<ResponseCache>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            fetcher,
            cache,
            endpoints,
        }
    }

    /// Create a client with an HTTP fetcher and an empty cache.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(
            Arc::new(fetcher),
            Arc::new(ResponseCache::new()),
            Endpoints::new(config.base_url.clone()),
        ))
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ========================================================================
    // Cached collections
    // ========================================================================

    /// Return the cached raw response for `key`, fetching `url` on first use.
    pub async fn get_cached_data(&self, key: CacheKey, url: &str) -> Arc<Value> {
        self.cache
            .get_or_fetch(key, url, self.fetcher.as_ref())
            .await
    }

    /// Every route variant.
    pub async fn route_list(&self) -> Vec<Route> {
        let response = self
            .get_cached_data(CacheKey::RouteList, &self.endpoints.route_list())
            .await;
        decode_items(&response)
    }

    /// Every stop.
    pub async fn stop_list(&self) -> Vec<Stop> {
        let response = self
            .get_cached_data(CacheKey::StopList, &self.endpoints.stop_list())
            .await;
        decode_items(&response)
    }

    /// Every (route variant, stop) pairing.
    pub async fn route_stop_list(&self) -> Vec<RouteStop> {
        let response = self
            .get_cached_data(CacheKey::RouteStopList, &self.endpoints.route_stop_list())
            .await;
        decode_items(&response)
    }

    // ========================================================================
    // Uncached details
    // ========================================================================

    /// Variants of a route.
    ///
    /// Without a direction, every variant with a matching route number is
    /// taken from the cached route list. With one, the single variant is
    /// fetched directly and returned as a zero- or one-element list.
    pub async fn route_details(
        &self,
        route: &str,
        direction: Option<Bound>,
        service_type: &str,
    ) -> Vec<Route> {
        match direction {
            None => self
                .route_list()
                .await
                .into_iter()
                .filter(|r| r.route == route)
                .collect(),
            Some(bound) => {
                let url = self.endpoints.route(route, bound, service_type);
                decode_items(&self.fetch_logged(&url).await)
            }
        }
    }

    /// A single stop, or `None` if the lookup failed.
    pub async fn stop_details(&self, stop_id: &str) -> Option<Stop> {
        let url = self.endpoints.stop(stop_id);
        decode_object(&self.fetch_logged(&url).await)
    }

    /// Stops of one route variant, in upstream order.
    pub async fn route_stops(
        &self,
        route: &str,
        direction: Bound,
        service_type: &str,
    ) -> Vec<RouteStop> {
        let url = self.endpoints.route_stop(route, direction, service_type);
        decode_items(&self.fetch_logged(&url).await)
    }

    /// Arrivals at a stop.
    ///
    /// A non-empty `route` selects the route-specific endpoint; otherwise the
    /// stop-wide endpoint is used and `service_type` is ignored.
    pub async fn eta(&self, stop_id: &str, route: Option<&str>, service_type: &str) -> Vec<Eta> {
        let url = match route.filter(|r| !r.is_empty()) {
            Some(route) => self.endpoints.eta(stop_id, route, service_type),
            None => self.endpoints.stop_eta(stop_id),
        };
        decode_items(&self.fetch_logged(&url).await)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Stops whose English or Chinese name contains `name`.
    pub async fn find_stops_by_name(&self, name: &str) -> Vec<Stop> {
        let matches = lookup::filter_stops(self.stop_list().await, name);
        debug!("{} stop(s) match '{}'", matches.len(), name);
        matches
    }

    /// Routes whose English or Chinese destination contains `destination`.
    pub async fn find_routes_by_destination(&self, destination: &str) -> Vec<Route> {
        let matches = lookup::filter_routes_by_destination(self.route_list().await, destination);
        debug!("{} route(s) go to '{}'", matches.len(), destination);
        matches
    }

    async fn fetch_logged(&self, url: &str) -> Value {
        let response = self.fetcher.fetch(url).await;
        if let Some(error) = response.get("error") {
            warn!("No data from {}: {}", url, error);
        }
        response
    }
}
