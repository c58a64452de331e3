//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::domains::kmb::KmbClient;

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::{
    DestinationTool, NextBusTool, RouteStopsTool, RoutesAtStopTool, StopSearchTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    client: KmbClient,
}

impl ToolRegistry {
    /// Create a new tool registry over a shared client.
    pub fn new(client: KmbClient) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            NextBusTool::NAME,
            DestinationTool::NAME,
            RouteStopsTool::NAME,
            StopSearchTool::NAME,
            RoutesAtStopTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            NextBusTool::to_tool(),
            DestinationTool::to_tool(),
            RouteStopsTool::to_tool(),
            StopSearchTool::to_tool(),
            RoutesAtStopTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let client = self.client.clone();
        match name {
            NextBusTool::NAME => NextBusTool::http_handler(arguments, client).await,
            DestinationTool::NAME => DestinationTool::http_handler(arguments, client).await,
            RouteStopsTool::NAME => RouteStopsTool::http_handler(arguments, client).await,
            StopSearchTool::NAME => StopSearchTool::http_handler(arguments, client).await,
            RoutesAtStopTool::NAME => RoutesAtStopTool::http_handler(arguments, client).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
