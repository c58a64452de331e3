//! Common utilities shared across the bus tools.
//!
//! Argument decoding, result construction and the small text formatting
//! helpers every report uses.

use chrono::DateTime;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::domains::tools::ToolError;

/// Build the `Tool` metadata for a params type.
pub fn tool_model<P>(name: &'static str, description: &'static str) -> Tool
where
    P: JsonSchema + 'static,
{
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Decode rmcp call arguments into a params struct.
pub fn params_from_object<P: DeserializeOwned>(args: JsonObject) -> Result<P, McpError> {
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Decode HTTP call arguments into a params struct.
pub fn params_from_value<P: DeserializeOwned>(args: serde_json::Value) -> Result<P, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Serialize a tool result for the HTTP JSON-RPC binding.
#[cfg(feature = "http")]
pub fn result_to_json(result: CallToolResult) -> serde_json::Value {
    serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}

/// Normalize a user-supplied route number ("1a " -> "1A").
pub fn normalize_route(route: &str) -> String {
    route.trim().to_uppercase()
}

/// Whether `value` looks like a route number or service type code.
///
/// Codes are plain ASCII alphanumerics ("1A", "N260", "2").
pub fn is_code(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Render an ETA timestamp as `YYYY-MM-DD HH:MM:SS` in its own offset.
///
/// Unparsable input falls back to cutting the `+offset` suffix and replacing
/// the `T` separator.
pub fn format_eta_time(eta: Option<&str>) -> String {
    match eta.filter(|t| !t.is_empty()) {
        None => "Not available".to_string(),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            Err(_) => raw
                .split('+')
                .next()
                .unwrap_or(raw)
                .replacen('T', " ", 1),
        },
    }
}
