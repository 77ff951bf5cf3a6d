//! Shared helper functions for MCP tool implementations.

use std::fmt::Display;

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

/// Trimmed tournament id, or the reason it cannot be used as a single path segment.
pub fn validate_tournament_id(raw: &str) -> Result<&str, String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err("tournament id must not be empty".to_string());
    }
    if id == "." || id == ".." || id.contains(['/', '\\', '?', '#', '%']) {
        return Err(format!("invalid tournament id '{}'", id));
    }
    Ok(id)
}

/// Endpoint path for a sub-resource of one tournament.
pub fn tournament_endpoint(id: &str, resource: &str) -> String {
    format!("tournaments/{}/{}", id, resource)
}

/// Success envelope holding the pretty-printed payload, optionally under a Markdown heading.
pub fn success_result(title: Option<&str>, payload: &Value) -> CallToolResult {
    let json = match serde_json::to_string_pretty(payload) {
        Ok(json) => json,
        Err(e) => return error_result("serializing upstream response", &e),
    };

    let text = match title {
        Some(title) => format!("# {}\n\n{}", title, json),
        None => json,
    };
    CallToolResult::success(vec![Content::text(text)])
}

/// Error envelope with a message an agent can relay to the user.
pub fn error_result(action: &str, error: &dyn Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!(
        "Error {}: {}",
        action, error
    ))])
}
