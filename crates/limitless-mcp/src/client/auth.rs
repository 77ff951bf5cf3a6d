//! Credential transmission strategies and the fallback between them.

use std::fmt;

/// Query parameter carrying the credential in [`AuthMode::Query`].
pub const KEY_QUERY_PARAM: &str = "key";

/// Request header carrying the credential in [`AuthMode::Header`].
pub const ACCESS_KEY_HEADER: &str = "X-Access-Key";

/// How the credential is attached to an upstream request.
///
/// A request starts in `Query` mode. Any failure there moves to `Header` mode for
/// exactly one more attempt; a failure in `Header` mode is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Query,
    Header,
}

impl AuthMode {
    /// The mode to retry in after a failure, or `None` when the failure is terminal.
    #[must_use]
    pub fn fallback(self) -> Option<AuthMode> {
        match self {
            AuthMode::Query => Some(AuthMode::Header),
            AuthMode::Header => None,
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Query => f.write_str("query"),
            AuthMode::Header => f.write_str("header"),
        }
    }
}
