//! Next bus tool.
//!
//! Resolves a stop name to every matching stop and lists the upcoming
//! arrivals of one route at each of them.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{
    format_eta_time, is_code, normalize_route, params_from_object, success_result, tool_model,
};
use crate::domains::kmb::{DEFAULT_SERVICE_TYPE, Eta, KmbClient, Stop};

#[cfg(feature = "http")]
use super::common::{params_from_value, result_to_json};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the next bus lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NextBusParams {
    /// Route number, e.g. "1A", "6", "960".
    #[schemars(description = "The bus route number (e.g., \"1A\", \"6\", \"960\")")]
    pub route: String,

    /// Full or partial stop name.
    #[schemars(description = "The name of the bus stop (English or Chinese, partial match)")]
    pub stop_name: String,

    /// Service type of the route variant.
    #[schemars(description = "Route service type (default: \"1\")")]
    #[serde(default)]
    pub service_type: Option<String>,
}

/// Next Bus Tool implementation.
#[derive(Debug, Clone)]
pub struct NextBusTool;

impl NextBusTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_next_bus";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the next arrival times for a bus route at a stop. \
         The stop is matched by partial name, and arrivals are listed for every matching stop.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(route = %params.route, stop_name = %params.stop_name))]
    pub async fn execute(params: &NextBusParams, client: &KmbClient) -> CallToolResult {
        info!(
            "Next bus requested for route {} at '{}'",
            params.route, params.stop_name
        );
        success_result(Self::report(params, client).await)
    }

    async fn report(params: &NextBusParams, client: &KmbClient) -> String {
        let route = normalize_route(&params.route);
        let service_type = params
            .service_type
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SERVICE_TYPE);
        if !is_code(&route) || !is_code(service_type) {
            return format!("Could not find information for route {}", route);
        }

        let stops = client.find_stops_by_name(&params.stop_name).await;
        if stops.is_empty() {
            return format!("Could not find any stops matching '{}'", params.stop_name);
        }

        let mut sections = Vec::with_capacity(stops.len());
        for stop in &stops {
            let etas = client.eta(&stop.stop, Some(&route), service_type).await;
            sections.push(render_arrivals(&route, stop, &etas));
        }

        sections.join("\n\n")
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: KmbClient,
    ) -> Result<serde_json::Value, ToolError> {
        let params: NextBusParams = params_from_value(arguments)?;
        Ok(result_to_json(Self::execute(&params, &client).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<NextBusParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: NextBusParams = params_from_object(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

/// Render the arrivals of `route` at one stop.
fn render_arrivals(route: &str, stop: &Stop, etas: &[Eta]) -> String {
    if etas.is_empty() {
        return format!(
            "No arrival data available for route {} at stop '{}' ({})",
            route, stop.name_en, stop.stop
        );
    }

    let route_etas: Vec<&Eta> = etas.iter().filter(|eta| eta.route == route).collect();
    if route_etas.is_empty() {
        return format!(
            "No scheduled arrivals for route {} at stop '{}' ({})",
            route, stop.name_en, stop.stop
        );
    }

    let mut lines = vec![format!(
        "Arrivals for route {} at '{}' ({}):",
        route, stop.name_en, stop.stop
    )];
    for eta in route_etas {
        let time = format_eta_time(eta.eta.as_deref());
        match eta.remark() {
            Some(remark) => lines.push(format!("- {} to {} ({})", time, eta.destination(), remark)),
            None => lines.push(format!("- {} to {}", time, eta.destination())),
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::kmb::testing::{self, StaticFetcher, client_with, url};
    use rmcp::model::RawContent;
    use serde_json::json;

    fn params(route: &str, stop_name: &str) -> NextBusParams {
        NextBusParams {
            route: route.to_string(),
            stop_name: stop_name.to_string(),
            service_type: None,
        }
    }

    fn text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[tokio::test]
    async fn test_arrivals_for_jordan_station() {
        let fetcher = StaticFetcher::new()
            .with(url("stop"), testing::stop_list())
            .with(url("eta/A3ADFCDF8487ADB9/1A/1"), testing::eta_response());
        let (client, _) = client_with(fetcher);

        let result = NextBusTool::execute(&params("1A", "jordan"), &client).await;
        assert!(!result.is_error.unwrap_or(false));

        let text = text(&result);
        assert!(text.starts_with("Arrivals for route 1A at 'JORDAN STATION'"));
        assert!(text.contains("12:10:00"));
        assert!(text.contains("12:25:00"));
        assert!(text.contains("- 2023-04-01 12:10:00 to 中環 (香港站)\n"));
        assert!(text.ends_with("- 2023-04-01 12:25:00 to 中環 (香港站) (原定班次)"));
    }

    #[tokio::test]
    async fn test_lowercase_route_is_normalized() {
        let fetcher = StaticFetcher::new()
            .with(url("stop"), testing::stop_list())
            .with(url("eta/A3ADFCDF8487ADB9/1A/1"), testing::eta_response());
        let (client, fetcher) = client_with(fetcher);

        let result = NextBusTool::execute(&params("1a", "JORDAN"), &client).await;
        assert!(text(&result).starts_with("Arrivals for route 1A"));
        assert_eq!(fetcher.calls(&url("eta/A3ADFCDF8487ADB9/1A/1")), 1);
    }

    #[tokio::test]
    async fn test_unknown_stop() {
        let fetcher = StaticFetcher::new().with(url("stop"), testing::stop_list());
        let (client, _) = client_with(fetcher);

        let result = NextBusTool::execute(&params("1A", "Sha Tin"), &client).await;
        assert_eq!(text(&result), "Could not find any stops matching 'Sha Tin'");
    }

    #[tokio::test]
    async fn test_each_matching_stop_gets_a_section() {
        // Only the Jordan stop has ETAs; the others fail upstream.
        let fetcher = StaticFetcher::new()
            .with(url("stop"), testing::stop_list())
            .with(url("eta/A3ADFCDF8487ADB9/1A/1"), testing::eta_response())
            .with(
                url("eta/B7C80A855DF5F56E/1A/1"),
                json!({ "data": [ { "route": "2", "eta": "2023-04-01T12:00:00+08:00" } ] }),
            );
        let (client, _) = client_with(fetcher);

        let result = NextBusTool::execute(&params("1A", "station"), &client).await;
        let sections: Vec<&str> = text(&result).split("\n\n").collect();
        assert_eq!(sections.len(), 3);
        assert!(sections[0].starts_with("Arrivals for route 1A"));
        assert_eq!(
            sections[1],
            "No scheduled arrivals for route 1A at stop 'CENTRAL STATION' (B7C80A855DF5F56E)"
        );
        assert_eq!(
            sections[2],
            "No arrival data available for route 1A at stop 'MONG KOK STATION' (HJ29876HWEF234XX)"
        );
    }

    #[tokio::test]
    async fn test_service_type_and_missing_eta() {
        let fetcher = StaticFetcher::new()
            .with(url("stop"), testing::stop_list())
            .with(
                url("eta/HJ29876HWEF234XX/960/2"),
                json!({ "data": [ {
                    "route": "960", "eta": null, "dest_en": "AIRPORT", "dest_tc": "",
                    "rmk_en": "Final Bus Departed", "rmk_tc": ""
                } ] }),
            );
        let (client, _) = client_with(fetcher);

        let params = NextBusParams {
            route: "960".to_string(),
            stop_name: "mong kok".to_string(),
            service_type: Some("2".to_string()),
        };
        let result = NextBusTool::execute(&params, &client).await;
        assert!(text(&result).contains("- Not available to AIRPORT (Final Bus Departed)"));
    }

    #[tokio::test]
    async fn test_malformed_route_is_not_sent_upstream() {
        let fetcher = StaticFetcher::new().with(url("stop"), testing::stop_list());
        let (client, fetcher) = client_with(fetcher);

        let result = NextBusTool::execute(&params("1A/../stop", "jordan"), &client).await;
        assert_eq!(text(&result), "Could not find information for route 1A/../STOP");

        let params = NextBusParams {
            route: "1A".to_string(),
            stop_name: "jordan".to_string(),
            service_type: Some("..".to_string()),
        };
        let result = NextBusTool::execute(&params, &client).await;
        assert_eq!(text(&result), "Could not find information for route 1A");
        assert!(fetcher.requests().is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_execute_runs_in_span_with_arguments() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let fetcher = StaticFetcher::new().with(url("stop"), testing::stop_list());
        let (client, _) = client_with(fetcher);
        NextBusTool::execute(&params("1A", "jordan"), &client).await;

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("execute{route=1A stop_name=jordan}"));
    }

    #[test]
    fn test_params_service_type_optional() {
        let params: NextBusParams =
            serde_json::from_str(r#"{"route": "1A", "stop_name": "Jordan"}"#).unwrap();
        assert!(params.service_type.is_none());
    }
}
