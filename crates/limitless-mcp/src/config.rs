//! Process configuration.
//!
//! The credential is resolved once at startup, in order of precedence, from a bare
//! `api-key=<KEY>` argument, the `--api-key` flag, or the `LIMITLESS_API_KEY`
//! environment variable. The resulting [`ServerConfig`] is passed explicitly into
//! the request client; nothing reads the credential from ambient state afterwards.

use std::fmt;
use std::sync::Arc;

use clap::Parser;
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;
use url::Url;

use crate::error::ConfigError;

/// Production Limitless TCG API base URL.
pub const DEFAULT_BASE_URL: &str = "https://play.limitlesstcg.com/api";

/// Prefix of the bare positional credential argument.
pub const API_KEY_ARG_PREFIX: &str = "api-key=";

#[derive(Parser)]
#[command(name = "limitless-mcp")]
#[command(about = "MCP server exposing Limitless TCG tournament data over stdio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Limitless API access key
    #[arg(long, env = "LIMITLESS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upstream API base URL
    #[arg(long, env = "LIMITLESS_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Bare arguments; `api-key=<KEY>` supplies the access key
    #[arg(value_name = "api-key=<KEY>")]
    pub args: Vec<String>,
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("args", &self.args.len())
            .finish()
    }
}

/// Opaque upstream access token. `Debug` never reveals the value.
#[derive(Clone)]
pub struct ApiKey(Arc<SecretString>);

impl ApiKey {
    /// Wrap a raw token; blank tokens are rejected.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(Arc::new(SecretString::from(trimmed.to_string()))))
        }
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Immutable configuration built once at process start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    api_key: ApiKey,
    base_url: String,
}

impl ServerConfig {
    /// Build a configuration from an explicit key and base URL.
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, ConfigError> {
        let api_key = ApiKey::new(api_key).ok_or(ConfigError::MissingApiKey)?;

        let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve configuration from parsed command-line arguments.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let mut arg_key = None;
        for (position, arg) in cli.args.iter().enumerate() {
            match arg.strip_prefix(API_KEY_ARG_PREFIX) {
                Some(value) => arg_key = Some(value.to_string()),
                None => warn!(position, "Ignoring unrecognized positional argument"),
            }
        }

        let api_key = arg_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| cli.api_key.filter(|k| !k.trim().is_empty()))
            .ok_or(ConfigError::MissingApiKey)?;

        Self::new(api_key, &cli.base_url)
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Base URL without a trailing separator.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
