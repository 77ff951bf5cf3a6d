//! MCP tool parameter types and envelope helpers.
//!
//! All parameter structs derive `Deserialize + JsonSchema` for MCP tool registration.

pub mod helpers;
pub mod params;

pub use helpers::*;
pub use params::*;
