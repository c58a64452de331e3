//! Stop search tool.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{params_from_object, success_result, tool_model};
use crate::domains::kmb::{KmbClient, Stop};

#[cfg(feature = "http")]
use super::common::{params_from_value, result_to_json};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the stop search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StopSearchParams {
    #[schemars(description = "Full or partial name of the bus stop to search for")]
    pub stop_name: String,
}

/// Stop Search Tool implementation.
#[derive(Debug, Clone)]
pub struct StopSearchTool;

impl StopSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "find_stop_by_name";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Find bus stops matching a name or partial name, with their IDs and coordinates.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(stop_name = %params.stop_name))]
    pub async fn execute(params: &StopSearchParams, client: &KmbClient) -> CallToolResult {
        info!("Searching stops matching '{}'", params.stop_name);

        let stops = client.find_stops_by_name(&params.stop_name).await;
        if stops.is_empty() {
            return success_result(format!(
                "Could not find any stops matching '{}'",
                params.stop_name
            ));
        }

        success_result(render_stops(&params.stop_name, &stops))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: KmbClient,
    ) -> Result<serde_json::Value, ToolError> {
        let params: StopSearchParams = params_from_value(arguments)?;
        Ok(result_to_json(Self::execute(&params, &client).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<StopSearchParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: StopSearchParams = params_from_object(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

fn render_stops(query: &str, stops: &[Stop]) -> String {
    let mut lines = vec![format!("Found {} stops matching '{}':", stops.len(), query)];

    for (i, stop) in stops.iter().enumerate() {
        match stop.name_tc.as_deref().filter(|tc| !tc.is_empty()) {
            Some(name_tc) => lines.push(format!("{}. {} ({})", i + 1, stop.name_en, name_tc)),
            None => lines.push(format!("{}. {}", i + 1, stop.name_en)),
        }
        lines.push(format!("   ID: {}", stop.stop));
        lines.push(format!("   Location: {}, {}", stop.lat, stop.long));
    }

    lines.join("\n")
}
