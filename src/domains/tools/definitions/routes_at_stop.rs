//! Routes-at-stop tool.
//!
//! Cross-references the route-stop collection against every stop matching
//! a name, then reports each serving route variant as origin/arrow/destination.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{params_from_object, success_result, tool_model};
use crate::domains::kmb::{Bound, KmbClient, RouteStop, Stop};

#[cfg(feature = "http")]
use super::common::{params_from_value, result_to_json};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the routes-at-stop lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RoutesAtStopParams {
    #[schemars(description = "Name of the bus stop (English or Chinese, partial match)")]
    pub stop_name: String,
}

/// Routes-at-Stop Tool implementation.
#[derive(Debug, Clone)]
pub struct RoutesAtStopTool;

/// (route, service_type) and the directions in which it calls at the stop.
type ServingGroup<'a> = ((&'a str, &'a str), Vec<Bound>);

impl RoutesAtStopTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_all_routes_at_stop";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get all bus routes that pass through a stop, with each route's origin and destination.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(stop_name = %params.stop_name))]
    pub async fn execute(params: &RoutesAtStopParams, client: &KmbClient) -> CallToolResult {
        info!("Listing routes at '{}'", params.stop_name);

        let stops = client.find_stops_by_name(&params.stop_name).await;
        if stops.is_empty() {
            return success_result(format!(
                "Could not find any stops matching '{}'",
                params.stop_name
            ));
        }

        let route_stops = client.route_stop_list().await;

        let mut sections = Vec::with_capacity(stops.len());
        for stop in &stops {
            sections.push(render_stop(client, stop, &route_stops).await);
        }

        success_result(sections.join("\n\n"))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: KmbClient,
    ) -> Result<serde_json::Value, ToolError> {
        let params: RoutesAtStopParams = params_from_value(arguments)?;
        Ok(result_to_json(Self::execute(&params, &client).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<RoutesAtStopParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: RoutesAtStopParams = params_from_object(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

/// Group the route-stop rows of one stop by (route, service_type), keeping
/// first-seen order.
fn serving_groups<'a>(stop_id: &str, route_stops: &'a [RouteStop]) -> Vec<ServingGroup<'a>> {
    let mut groups: Vec<ServingGroup<'a>> = Vec::new();
    for rs in route_stops.iter().filter(|rs| rs.stop == stop_id) {
        let key = (rs.route.as_str(), rs.service_type.as_str());
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bounds)) => {
                if !bounds.contains(&rs.bound) {
                    bounds.push(rs.bound);
                }
            }
            None => groups.push((key, vec![rs.bound])),
        }
    }
    groups
}

async fn render_stop(client: &KmbClient, stop: &Stop, route_stops: &[RouteStop]) -> String {
    let groups = serving_groups(&stop.stop, route_stops);
    if groups.is_empty() {
        return format!("No routes found for stop '{}' ({})", stop.name_en, stop.stop);
    }

    let mut lines = vec![format!("Routes serving '{}' ({}):", stop.name_en, stop.stop)];

    for ((route, service_type), bounds) in groups {
        let variants = client.route_details(route, None, service_type).await;
        for variant in variants
            .iter()
            .filter(|v| v.service_type == service_type && bounds.contains(&v.bound))
        {
            lines.push(format!(
                "- Route {}: {} {} {}",
                route,
                variant.origin(),
                variant.bound.arrow(),
                variant.destination()
            ));
        }
    }

    lines.join("\n")
}
