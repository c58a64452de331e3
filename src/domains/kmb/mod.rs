//! KMB open-data access domain.
//!
//! This module is the data-access and lookup layer that every tool is built on:
//!
//! - `endpoints`: URL construction for the upstream ETA API
//! - `fetch`: the `ApiFetcher` seam and its reqwest-backed implementation
//! - `cache`: process-lifetime memoization of the three large collections
//! - `client`: collection, detail and ETA accessors composed over fetch + cache
//! - `lookup`: case-insensitive name and destination matching
//! - `types`: typed records decoded from the `data` envelope
//!
//! Upstream failures never escape this layer as errors. A failed request
//! produces an `{"error": ...}` object, and every accessor reads such a
//! response as "no data".

pub mod cache;
pub mod client;
pub mod endpoints;
mod error;
pub mod fetch;
pub mod lookup;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CacheEntry, CacheKey, ResponseCache};
pub use client::KmbClient;
pub use endpoints::{DEFAULT_BASE_URL, DEFAULT_SERVICE_TYPE, Endpoints};
pub use error::ApiError;
pub use fetch::{ApiFetcher, HttpFetcher};
pub use types::{Bound, Eta, Route, RouteStop, Stop};
