//! Domains module containing business logic organized by bounded contexts.
//!
//! - `kmb`: data access and lookup over the KMB open-data API
//! - `tools`: MCP tools composed from those lookups

pub mod kmb;
pub mod tools;
