//! Parameter structs for all MCP tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::client::QueryParams;

// ── list_tournaments ──

/// Parameters for the `list_tournaments` tool. Every filter is optional.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListTournamentsParams {
    /// Game identifier.
    #[schemars(
        description = "Game identifier, e.g. 'VGC' (Pokemon video game), 'PTCG' (Pokemon TCG), 'POCKET' (Pokemon TCG Pocket)"
    )]
    pub game: Option<String>,
    /// Format identifier within the game.
    #[schemars(description = "Format identifier within the game, e.g. 'STANDARD'")]
    pub format: Option<String>,
    /// Organizer ID.
    #[serde(rename = "organizerId")]
    #[schemars(description = "Only return tournaments run by this organizer ID")]
    pub organizer_id: Option<u32>,
    /// Page number (1-based).
    #[schemars(description = "Page number for pagination, starting at 1")]
    pub page: Option<u32>,
    /// Maximum number of tournaments to return.
    #[schemars(description = "Maximum number of tournaments to return per page")]
    pub limit: Option<u32>,
}

impl ListTournamentsParams {
    /// Upstream query parameters; unset filters are omitted.
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("game", self.game.as_deref())
            .with("format", self.format.as_deref())
            .with("organizerId", self.organizer_id)
            .with("page", self.page)
            .with("limit", self.limit)
    }

    /// Human-readable heading describing the active filters.
    pub fn title(&self) -> String {
        let mut filters = Vec::new();
        if let Some(game) = &self.game {
            filters.push(format!("game: {}", game));
        }
        if let Some(format) = &self.format {
            filters.push(format!("format: {}", format));
        }
        if let Some(organizer_id) = self.organizer_id {
            filters.push(format!("organizer: {}", organizer_id));
        }
        if let Some(page) = self.page {
            filters.push(format!("page: {}", page));
        }
        if let Some(limit) = self.limit {
            filters.push(format!("limit: {}", limit));
        }

        if filters.is_empty() {
            "Tournaments".to_string()
        } else {
            format!("Tournaments ({})", filters.join(", "))
        }
    }
}

// ── get_tournament_details / get_tournament_standings / get_tournament_pairings ──

/// Parameters for the single-tournament tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TournamentParams {
    /// Tournament ID.
    #[schemars(description = "Tournament ID, as returned in the 'id' field of list_tournaments results")]
    pub id: String,
}
