//! Typed records for the KMB open-data API.
//!
//! Every upstream response is a JSON object whose payload sits under `data`
//! (an array for collections, an object for single entities). The helpers at
//! the bottom of this module unwrap that envelope; anything without a `data`
//! field, including `{"error": ...}` objects, decodes as empty.
//!
//! The upstream API is loose with scalar types (`seq` and coordinates arrive
//! as strings, `service_type` is a string on routes and a number on ETAs), so
//! those fields accept either representation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

// ============================================================================
// Direction
// ============================================================================

/// Travel direction of a route variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Bound {
    #[serde(rename = "I")]
    Inbound,
    #[serde(rename = "O")]
    Outbound,
}

impl Bound {
    /// Parse a direction code. `"I"` is inbound, anything else is outbound.
    pub fn from_code(code: &str) -> Self {
        if code.eq_ignore_ascii_case("I") || code.eq_ignore_ascii_case("inbound") {
            Self::Inbound
        } else {
            Self::Outbound
        }
    }

    /// Path segment used by the per-route endpoints.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Inbound => "Inbound",
            Self::Outbound => "Outbound",
        }
    }

    /// Arrow placed between origin and destination.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Outbound => "→",
            Self::Inbound => "←",
        }
    }
}

impl From<String> for Bound {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

// ============================================================================
// Records
// ============================================================================

/// A route variant, identified by (route, bound, service_type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub route: String,
    pub bound: Bound,
    #[serde(deserialize_with = "lenient_string")]
    pub service_type: String,
    #[serde(default)]
    pub orig_en: String,
    #[serde(default)]
    pub orig_tc: Option<String>,
    #[serde(default)]
    pub dest_en: String,
    #[serde(default)]
    pub dest_tc: Option<String>,
}

impl Route {
    /// English origin, or "Unknown" when the record has none.
    pub fn origin(&self) -> &str {
        non_empty(&self.orig_en).unwrap_or("Unknown")
    }

    /// English destination, or "Unknown" when the record has none.
    pub fn destination(&self) -> &str {
        non_empty(&self.dest_en).unwrap_or("Unknown")
    }
}

/// A bus stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub stop: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_tc: Option<String>,
    #[serde(default = "zero", deserialize_with = "lenient_string")]
    pub lat: String,
    #[serde(default = "zero", rename = "long", deserialize_with = "lenient_string")]
    pub long: String,
}

impl Stop {
    /// English name, or "Unknown" when the record has none.
    pub fn name(&self) -> &str {
        non_empty(&self.name_en).unwrap_or("Unknown")
    }
}

/// Position of a stop along one route variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub route: String,
    pub bound: Bound,
    #[serde(deserialize_with = "lenient_string")]
    pub service_type: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub seq: u32,
    pub stop: String,
}

/// One estimated arrival at a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eta {
    pub route: String,
    #[serde(default)]
    pub dir: Option<Bound>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub seq: u32,
    #[serde(default)]
    pub stop: Option<String>,
    /// RFC 3339 timestamp; `None` when no estimate is available.
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub dest_en: Option<String>,
    #[serde(default)]
    pub dest_tc: Option<String>,
    #[serde(default)]
    pub rmk_en: Option<String>,
    #[serde(default)]
    pub rmk_tc: Option<String>,
}

impl Eta {
    /// Destination text, Traditional Chinese first.
    pub fn destination(&self) -> &str {
        opt_non_empty(&self.dest_tc)
            .or_else(|| opt_non_empty(&self.dest_en))
            .unwrap_or("Unknown destination")
    }

    /// Remark text, Traditional Chinese first. `None` when both are empty.
    pub fn remark(&self) -> Option<&str> {
        opt_non_empty(&self.rmk_tc).or_else(|| opt_non_empty(&self.rmk_en))
    }
}

// ============================================================================
// Envelope helpers
// ============================================================================

/// Decode the `data` field of a response as a list of records.
///
/// A `data` object is treated as a one-element list. Records that do not
/// decode are skipped.
pub fn decode_items<T: DeserializeOwned>(response: &Value) -> Vec<T> {
    match response.get("data") {
        Some(Value::Array(items)) => items.iter().filter_map(decode_record).collect(),
        Some(item @ Value::Object(_)) => decode_record(item).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Decode the `data` field of a response as a single record.
pub fn decode_object<T: DeserializeOwned>(response: &Value) -> Option<T> {
    response.get("data").and_then(decode_record)
}

fn decode_record<T: DeserializeOwned>(item: &Value) -> Option<T> {
    match T::deserialize(item) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("Skipping malformed record: {}", e);
            None
        }
    }
}

// ============================================================================
// Serde helpers
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    };
    raw.trim().parse().map_err(serde::de::Error::custom)
}

fn zero() -> String {
    "0".to_string()
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

fn opt_non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().and_then(non_empty)
}
