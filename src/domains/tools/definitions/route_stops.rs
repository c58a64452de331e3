//! Stops-on-route tool.
//!
//! Lists every stop of every variant of a route, in travel order. Stop
//! details are fetched one at a time; a stop whose lookup fails is left out
//! and the numbering closes over the gap.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::common::{normalize_route, params_from_object, success_result, tool_model};
use crate::domains::kmb::{DEFAULT_SERVICE_TYPE, KmbClient, Route};

#[cfg(feature = "http")]
use super::common::{params_from_value, result_to_json};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the route stop listing.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RouteStopsParams {
    #[schemars(description = "The bus route number (e.g., \"1A\", \"6\", \"960\")")]
    pub route: String,
}

/// Route Stops Tool implementation.
#[derive(Debug, Clone)]
pub struct RouteStopsTool;

impl RouteStopsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_route_stops_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get all stops along a bus route, in order, for each direction and service type.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(route = %params.route))]
    pub async fn execute(params: &RouteStopsParams, client: &KmbClient) -> CallToolResult {
        let route = normalize_route(&params.route);
        info!("Listing stops for route {}", route);

        let variants = client
            .route_details(&route, None, DEFAULT_SERVICE_TYPE)
            .await;
        if variants.is_empty() {
            return success_result(format!("Could not find information for route {}", route));
        }

        let mut sections = Vec::with_capacity(variants.len());
        for variant in &variants {
            sections.push(render_variant(client, variant).await);
        }

        success_result(sections.join("\n\n"))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: KmbClient,
    ) -> Result<serde_json::Value, ToolError> {
        let params: RouteStopsParams = params_from_value(arguments)?;
        Ok(result_to_json(Self::execute(&params, &client).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<RouteStopsParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(client: KmbClient) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: RouteStopsParams = params_from_object(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

async fn render_variant(client: &KmbClient, variant: &Route) -> String {
    let mut header = format!(
        "Route {} {} from {} to {}",
        variant.route,
        variant.bound.label(),
        variant.origin(),
        variant.destination()
    );
    if variant.service_type != DEFAULT_SERVICE_TYPE {
        header.push_str(&format!(" (service type {})", variant.service_type));
    }
    header.push(':');

    let mut lines = vec![header];

    let mut stops = client
        .route_stops(&variant.route, variant.bound, &variant.service_type)
        .await;
    if stops.is_empty() {
        lines.push("  No stop information available".to_string());
        return lines.join("\n");
    }

    // Upstream order is not guaranteed.
    stops.sort_by_key(|s| s.seq);

    let mut number = 0;
    for route_stop in &stops {
        match client.stop_details(&route_stop.stop).await {
            Some(stop) => {
                number += 1;
                lines.push(format!("  {}. {} (ID: {})", number, stop.name(), route_stop.stop));
            }
            None => debug!(
                "Omitting stop {} (seq {}) of route {}: no details",
                route_stop.stop, route_stop.seq, variant.route
            ),
        }
    }

    lines.join("\n")
}
