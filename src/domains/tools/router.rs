//! Tool Router - builds the rmcp ToolRouter for the STDIO transport.
//!
//! Each tool knows how to create its own route; this module only collects
//! them around a shared `KmbClient`.

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::kmb::KmbClient;

use super::definitions::{
    DestinationTool, NextBusTool, RouteStopsTool, RoutesAtStopTool, StopSearchTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: KmbClient) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(NextBusTool::create_route(client.clone()))
        .with_route(DestinationTool::create_route(client.clone()))
        .with_route(RouteStopsTool::create_route(client.clone()))
        .with_route(StopSearchTool::create_route(client.clone()))
        .with_route(RoutesAtStopTool::create_route(client))
}
