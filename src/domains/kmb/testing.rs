//! In-memory `ApiFetcher` and sample payloads for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::client::KmbClient;
use super::endpoints::Endpoints;
use super::fetch::ApiFetcher;
use super::cache::ResponseCache;

pub const BASE: &str = "http://kmb.test";

/// Serves canned responses by exact URL and records every request.
///
/// Unknown URLs answer like a 404 from the real fetcher.
#[derive(Default)]
pub struct StaticFetcher {
    responses: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, response: Value) -> Self {
        self.responses.insert(url.into(), response);
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Value {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| json!({ "error": format!("HTTP error: 404 Not Found for url ({})", url) }))
    }
}

/// Build a client over `fetcher`, keeping a handle to the fetcher for
/// call assertions.
pub fn client_with(fetcher: StaticFetcher) -> (KmbClient, Arc<StaticFetcher>) {
    let fetcher = Arc::new(fetcher);
    let client = KmbClient::new(
        fetcher.clone(),
        Arc::new(ResponseCache::new()),
        Endpoints::new(BASE),
    );
    (client, fetcher)
}

pub fn url(path: &str) -> String {
    format!("{}/{}", BASE, path)
}

pub fn route_list() -> Value {
    json!({
        "type": "RouteList",
        "version": "1.0",
        "generated_timestamp": "2023-04-01T12:00:00+08:00",
        "data": [
            {
                "co": "KMB", "route": "1A", "bound": "O", "service_type": "1",
                "orig_en": "JORDAN", "orig_tc": "佐敦",
                "dest_en": "CENTRAL (HONG KONG STATION)", "dest_tc": "中環 (香港站)"
            },
            {
                "co": "KMB", "route": "1A", "bound": "I", "service_type": "1",
                "orig_en": "CENTRAL (HONG KONG STATION)", "orig_tc": "中環 (香港站)",
                "dest_en": "JORDAN", "dest_tc": "佐敦"
            },
            {
                "co": "KMB", "route": "960", "bound": "O", "service_type": "1",
                "orig_en": "TUEN MUN (TOWN CENTRE)", "orig_tc": "屯門 (市中心)",
                "dest_en": "AIRPORT (GROUND TRANSPORTATION CENTRE)", "dest_tc": "機場 (地面運輸中心)"
            }
        ]
    })
}

pub fn stop_list() -> Value {
    json!({
        "type": "StopList",
        "version": "1.0",
        "data": [
            {
                "stop": "A3ADFCDF8487ADB9", "name_en": "JORDAN STATION", "name_tc": "佐敦站",
                "lat": "22.304893", "long": "114.171997"
            },
            {
                "stop": "B7C80A855DF5F56E", "name_en": "CENTRAL STATION", "name_tc": "中環站",
                "lat": "22.282039", "long": "114.158119"
            },
            {
                "stop": "HJ29876HWEF234XX", "name_en": "MONG KOK STATION", "name_tc": "旺角站",
                "lat": 22.319359, "long": 114.168815
            }
        ]
    })
}

pub fn route_stop_list() -> Value {
    json!({
        "type": "RouteStopList",
        "version": "1.0",
        "data": [
            { "route": "1A", "bound": "O", "service_type": "1", "seq": "1", "stop": "A3ADFCDF8487ADB9" },
            { "route": "1A", "bound": "O", "service_type": "1", "seq": "2", "stop": "B7C80A855DF5F56E" },
            { "route": "960", "bound": "O", "service_type": "1", "seq": "1", "stop": "HJ29876HWEF234XX" }
        ]
    })
}

pub fn stop_detail(id: &str, name_en: &str) -> Value {
    json!({
        "type": "Stop",
        "version": "1.0",
        "data": { "stop": id, "name_en": name_en, "name_tc": "", "lat": "22.3", "long": "114.1" }
    })
}

pub fn eta_response() -> Value {
    json!({
        "type": "ETA",
        "version": "1.0",
        "data": [
            {
                "co": "KMB", "route": "1A", "dir": "O", "service_type": 1, "seq": 1,
                "dest_tc": "中環 (香港站)", "dest_en": "CENTRAL (HONG KONG STATION)",
                "eta_seq": 1, "eta": "2023-04-01T12:10:00+08:00",
                "rmk_tc": "", "rmk_en": ""
            },
            {
                "co": "KMB", "route": "1A", "dir": "O", "service_type": 1, "seq": 1,
                "dest_tc": "中環 (香港站)", "dest_en": "CENTRAL (HONG KONG STATION)",
                "eta_seq": 2, "eta": "2023-04-01T12:25:00+08:00",
                "rmk_tc": "原定班次", "rmk_en": "Scheduled Bus"
            }
        ]
    })
}
