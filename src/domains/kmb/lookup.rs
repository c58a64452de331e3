//! Free-text matching over stop names and route destinations.
//!
//! Matching is a case-insensitive substring test against the English name and,
//! when present, the Traditional Chinese name. Results keep source order.

use super::types::{Route, Stop};

/// A lowercased search needle.
#[derive(Debug, Clone)]
pub struct Needle(String);

impl Needle {
    pub fn new(query: &str) -> Self {
        Self(query.to_lowercase())
    }

    fn found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0)
    }

    fn found_in_opt(&self, haystack: Option<&str>) -> bool {
        haystack.is_some_and(|h| !h.is_empty() && self.found_in(h))
    }
}

/// Does the stop's English or Chinese name contain the needle?
pub fn stop_matches(stop: &Stop, needle: &Needle) -> bool {
    needle.found_in(&stop.name_en) || needle.found_in_opt(stop.name_tc.as_deref())
}

/// Does the route's English or Chinese destination contain the needle?
pub fn destination_matches(route: &Route, needle: &Needle) -> bool {
    needle.found_in(&route.dest_en) || needle.found_in_opt(route.dest_tc.as_deref())
}

/// Filter stops by name, preserving order.
pub fn filter_stops(stops: Vec<Stop>, query: &str) -> Vec<Stop> {
    let needle = Needle::new(query);
    stops
        .into_iter()
        .filter(|stop| stop_matches(stop, &needle))
        .collect()
}

/// Filter routes by destination, preserving order.
pub fn filter_routes_by_destination(routes: Vec<Route>, query: &str) -> Vec<Route> {
    let needle = Needle::new(query);
    routes
        .into_iter()
        .filter(|route| destination_matches(route, &needle))
        .collect()
}
