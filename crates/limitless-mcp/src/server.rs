//! MCP ServerHandler implementation for the Limitless TCG API.
//!
//! - `list_tournaments` — List tournaments filtered by game, format, and organizer
//! - `get_tournament_details` — Get details for one tournament
//! - `get_tournament_standings` — Get final standings for one tournament
//! - `get_tournament_pairings` — Get round-by-round pairings for one tournament
//!
//! Every tool returns `Ok(CallToolResult)`. Upstream failures become envelopes with
//! `is_error` set; they never surface as protocol errors.

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use tracing::{debug, warn};

use crate::client::{LimitlessClient, QueryParams};
use crate::config::ServerConfig;
use crate::error::ClientResult;
use crate::tools::*;

const INSTRUCTIONS: &str = "Limitless TCG hosts tournaments for the Pokemon video game (VGC), \
     the Pokemon Trading Card Game (PTCG) and other games. \
     Start with list_tournaments to find tournaments and their IDs, then use \
     get_tournament_details, get_tournament_standings or get_tournament_pairings with an ID \
     from those results. Never guess tournament IDs.";

/// Limitless TCG MCP server handler.
#[derive(Debug, Clone)]
pub struct LimitlessMcpServer {
    tool_router: ToolRouter<Self>,
    client: LimitlessClient,
}

impl LimitlessMcpServer {
    pub fn new(client: LimitlessClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client,
        }
    }

    /// Build the upstream client from `config` and wrap it in a server.
    pub fn from_config(config: &ServerConfig) -> ClientResult<Self> {
        Ok(Self::new(LimitlessClient::new(config)?))
    }

    /// Issue one upstream request and wrap the outcome in an envelope.
    async fn fetch(
        &self,
        action: &str,
        endpoint: &str,
        params: &QueryParams,
        title: Option<&str>,
    ) -> CallToolResult {
        debug!(endpoint = %endpoint, "Dispatching tool request");
        match self.client.get_json(endpoint, params).await {
            Ok(payload) => success_result(title, &payload),
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "Tool request failed");
                error_result(action, &e)
            }
        }
    }

    /// Shared body of the single-tournament tools.
    async fn fetch_tournament_resource(
        &self,
        params: TournamentParams,
        resource: &str,
        action: &str,
    ) -> CallToolResult {
        let id = match validate_tournament_id(&params.id) {
            Ok(id) => id,
            Err(reason) => return error_result(action, &reason),
        };

        let endpoint = tournament_endpoint(id, resource);
        self.fetch(action, &endpoint, &QueryParams::new(), None)
            .await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for LimitlessMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "limitless-mcp".to_string(),
                title: Some("Limitless TCG MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server exposing Limitless TCG tournament listings, details, \
                     standings, and pairings"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

#[tool_router(router = tool_router)]
impl LimitlessMcpServer {
    /// List tournaments with optional filters.
    #[tool(
        name = "list_tournaments",
        description = "List tournaments hosted on Limitless TCG, most recent first. If the user does not name a game, use game 'VGC'. Use 'PTCG' for the Pokemon Trading Card Game and 'POCKET' for Pokemon TCG Pocket. Start with a limit of around 10-20; only request further pages (page=2, 3, ...) when the tournament you are looking for is not in the current page. Users often refer to events by city or series name ('Worlds', 'NAIC', 'EUIC', 'LAIC', 'OCIC', 'Regionals'); match those against tournament names in the results rather than passing them as filters. Returns JSON tournament summaries including each tournament's 'id'."
    )]
    pub async fn list_tournaments(
        &self,
        Parameters(params): Parameters<ListTournamentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let title = params.title();
        Ok(self
            .fetch(
                "listing tournaments",
                "tournaments",
                &params.to_query(),
                Some(&title),
            )
            .await)
    }

    /// Get details for one tournament.
    #[tool(
        name = "get_tournament_details",
        description = "Get details for a single Limitless TCG tournament: name, game, format, organizer, date, player count, and decklist/phase information. Requires the tournament 'id' from list_tournaments results."
    )]
    pub async fn get_tournament_details(
        &self,
        Parameters(params): Parameters<TournamentParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self
            .fetch_tournament_resource(params, "details", "fetching tournament details")
            .await)
    }

    /// Get standings for one tournament.
    #[tool(
        name = "get_tournament_standings",
        description = "Get the standings of a Limitless TCG tournament: placing, player name, country, record, and decklist or team where available. Requires the tournament 'id' from list_tournaments results. Pokemon names in teams and decklists may use regional or form suffixes (e.g. 'Ninetales-Alola', 'Urshifu-Rapid-Strike'); match the user's wording loosely against them."
    )]
    pub async fn get_tournament_standings(
        &self,
        Parameters(params): Parameters<TournamentParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self
            .fetch_tournament_resource(params, "standings", "fetching tournament standings")
            .await)
    }

    /// Get pairings for one tournament.
    #[tool(
        name = "get_tournament_pairings",
        description = "Get round-by-round pairings and match results of a Limitless TCG tournament, including the phase and table of each match. Requires the tournament 'id' from list_tournaments results. Use this to answer who played whom and who won a given round."
    )]
    pub async fn get_tournament_pairings(
        &self,
        Parameters(params): Parameters<TournamentParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self
            .fetch_tournament_resource(params, "pairings", "fetching tournament pairings")
            .await)
    }
}
