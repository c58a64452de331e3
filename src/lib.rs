//! KMB Bus MCP Server Library
//!
//! Exposes the Kowloon Motor Bus open-data API (routes, stops, route-stop
//! mappings and estimated arrival times) as Model Context Protocol tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**:
//!   - **kmb**: cached collection accessors, uncached detail/ETA accessors and
//!     name matching
//!   - **tools**: the five query tools rendered as plain text
//!
//! # Example
//!
//! ```rust,no_run
//! use kmb_mcp_server::{Config, McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::kmb::KmbClient;
