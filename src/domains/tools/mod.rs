//! Tools domain module.
//!
//! Tools are the functions MCP clients call. Each one resolves free-text input
//! through the `kmb` lookups, fans out detail or ETA requests one at a time,
//! and renders a plain-text report.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder for the STDIO transport
//! - `registry.rs` - Tool listing and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/`
//! 2. Define params, `execute()`, `to_tool()`, `create_route()` and `http_handler()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add the route in `router.rs`
//! 5. Register in `registry.rs` for HTTP support

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
