//! Limitless TCG MCP Server library.
//!
//! Provides the [`server::LimitlessMcpServer`] MCP server handler, the authenticated
//! [`client::LimitlessClient`], and tool parameter types.
//! Used by the `limitless-mcp` binary and available for integration testing.

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod tools;
