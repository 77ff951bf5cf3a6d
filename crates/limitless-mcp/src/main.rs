//! Limitless TCG MCP Server
//!
//! Model Context Protocol server exposing Limitless TCG tournament data
//! (listings, details, standings, pairings) to LLM agents over stdio.

use clap::Parser;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use limitless_mcp::config::{Cli, ServerConfig};
use limitless_mcp::server::LimitlessMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP stream; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("limitless_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_cli(cli)?;

    tracing::info!(base_url = %config.base_url(), "limitless-mcp starting (stdio transport)");

    let server = LimitlessMcpServer::from_config(&config)?;
    let transport = rmcp::transport::io::stdio();

    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
