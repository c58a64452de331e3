//! Routes-to-destination tool.
//!
//! Searches route destinations and groups the hits by origin.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{params_from_object, success_result, tool_model};
use crate::domains::kmb::{KmbClient, Route};

#[cfg(feature = "http")]
use super::common::{params_from_value, result_to_json};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the destination search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DestinationParams {
    #[schemars(description = "The destination to search for (e.g., \"Central\", \"Mong Kok\", \"Airport\")")]
    pub destination: String,
}

/// Buses-to-Destination Tool implementation.
#[derive(Debug, Clone)]
pub struct DestinationTool;

impl DestinationTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "find_buses_to_destination";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Find bus routes that go to a destination, grouped by where they start.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(destination = %params.destination))]
    pub async fn execute(params: &DestinationParams, client: &KmbClient) -> CallToolResult {
        info!("Searching routes to '{}'", params.destination);

        let routes = client.find_routes_by_destination(&params.destination).await;
        if routes.is_empty() {
            return success_result(format!(
                "Could not find any routes going to '{}'",
                params.destination
            ));
        }

        success_result(render_by_origin(&params.destination, &routes))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: KmbClient,
    ) -> Result<serde_json::Value, ToolError> {
        let params: DestinationParams = params_from_value(arguments)?;
        Ok(result_to_json(Self::execute(&params, &client).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<DestinationParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: DestinationParams = params_from_object(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

/// Group routes by origin in first-seen order and render them.
fn render_by_origin(destination: &str, routes: &[Route]) -> String {
    let mut groups: Vec<(&str, Vec<&Route>)> = Vec::new();
    for route in routes {
        match groups.iter_mut().find(|(origin, _)| *origin == route.origin()) {
            Some((_, members)) => members.push(route),
            None => groups.push((route.origin(), vec![route])),
        }
    }

    let mut lines = vec![format!("Bus routes going to '{}':", destination)];
    for (origin, members) in groups {
        lines.push(format!("\nFrom {}:", origin));
        for route in members {
            lines.push(format!(
                "- Route {} to {} ({})",
                route.route,
                route.destination(),
                route.bound.label()
            ));
        }
    }

    lines.join("\n")
}
