//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod destination;
pub mod next_bus;
pub mod route_stops;
pub mod routes_at_stop;
pub mod stop_search;

pub use destination::{DestinationParams, DestinationTool};
pub use next_bus::{NextBusParams, NextBusTool};
pub use route_stops::{RouteStopsParams, RouteStopsTool};
pub use routes_at_stop::{RoutesAtStopParams, RoutesAtStopTool};
pub use stop_search::{StopSearchParams, StopSearchTool};
