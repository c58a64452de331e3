//! URL construction for the KMB open-data API.
//!
//! Route numbers, service types and stop IDs are percent-encoded as single
//! path segments.

use std::borrow::Cow;

use super::types::Bound;

/// Production base URL of the KMB ETA API.
pub const DEFAULT_BASE_URL: &str = "https://data.etabus.gov.hk/v1/transport/kmb";

/// Service type used when the caller does not name one.
pub const DEFAULT_SERVICE_TYPE: &str = "1";

/// Builds every endpoint URL from a single base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Create endpoints rooted at `base_url`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full route list. The upstream API expects the trailing slash here.
    pub fn route_list(&self) -> String {
        format!("{}/route/", self.base_url)
    }

    /// A single route variant.
    pub fn route(&self, route: &str, bound: Bound, service_type: &str) -> String {
        format!(
            "{}/route/{}/{}/{}",
            self.base_url,
            segment(route),
            bound.path_segment(),
            segment(service_type)
        )
    }

    /// Full stop list.
    pub fn stop_list(&self) -> String {
        format!("{}/stop", self.base_url)
    }

    /// A single stop.
    pub fn stop(&self, stop_id: &str) -> String {
        format!("{}/stop/{}", self.base_url, segment(stop_id))
    }

    /// Full route-stop join list.
    pub fn route_stop_list(&self) -> String {
        format!("{}/route-stop", self.base_url)
    }

    /// Ordered stops of one route variant.
    pub fn route_stop(&self, route: &str, bound: Bound, service_type: &str) -> String {
        format!(
            "{}/route-stop/{}/{}/{}",
            self.base_url,
            segment(route),
            bound.path_segment(),
            segment(service_type)
        )
    }

    /// ETAs of one route at one stop.
    pub fn eta(&self, stop_id: &str, route: &str, service_type: &str) -> String {
        format!(
            "{}/eta/{}/{}/{}",
            self.base_url,
            segment(stop_id),
            segment(route),
            segment(service_type)
        )
    }

    /// ETAs of every route at one stop.
    pub fn stop_eta(&self, stop_id: &str) -> String {
        format!("{}/stop-eta/{}", self.base_url, segment(stop_id))
    }
}

fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.route_list(),
            "https://data.etabus.gov.hk/v1/transport/kmb/route/"
        );
        assert_eq!(
            endpoints.stop_list(),
            "https://data.etabus.gov.hk/v1/transport/kmb/stop"
        );
        assert_eq!(
            endpoints.route_stop_list(),
            "https://data.etabus.gov.hk/v1/transport/kmb/route-stop"
        );
    }

    #[test]
    fn test_detail_urls() {
        let endpoints = Endpoints::new("http://localhost:9000/kmb/");
        assert_eq!(endpoints.base_url(), "http://localhost:9000/kmb");
        assert_eq!(
            endpoints.route("1A", Bound::Outbound, "1"),
            "http://localhost:9000/kmb/route/1A/outbound/1"
        );
        assert_eq!(
            endpoints.route_stop("1A", Bound::Inbound, "2"),
            "http://localhost:9000/kmb/route-stop/1A/inbound/2"
        );
        assert_eq!(endpoints.stop("ABC"), "http://localhost:9000/kmb/stop/ABC");
        assert_eq!(
            endpoints.eta("ABC", "1A", "1"),
            "http://localhost:9000/kmb/eta/ABC/1A/1"
        );
        assert_eq!(
            endpoints.stop_eta("ABC"),
            "http://localhost:9000/kmb/stop-eta/ABC"
        );
    }

    #[test]
    fn test_user_values_stay_in_their_segment() {
        let endpoints = Endpoints::new("http://kmb.test");
        assert_eq!(
            endpoints.eta("ABC", "1A/../stop", "1"),
            "http://kmb.test/eta/ABC/1A%2F..%2Fstop/1"
        );
        assert_eq!(
            endpoints.route("1A?x", Bound::Outbound, "1#y"),
            "http://kmb.test/route/1A%3Fx/outbound/1%23y"
        );
        assert_eq!(
            endpoints.stop("A B"),
            "http://kmb.test/stop/A%20B"
        );
    }
}
