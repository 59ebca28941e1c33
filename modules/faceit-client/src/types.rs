use std::collections::HashMap;

use serde::Deserialize;

/// Result of resolving one player's skill level. Produced exactly once per lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The player has a linked account with a rating for the game.
    Found { level: u32 },
    /// No linked account, or an account with no rating for the game.
    NotFound,
    /// Transport, status or parse failure. Never shown to players.
    Failed { reason: String },
}

impl LookupOutcome {
    pub fn level(&self) -> Option<u32> {
        match self {
            LookupOutcome::Found { level } => Some(*level),
            _ => None,
        }
    }
}

impl std::fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupOutcome::Found { level } => write!(f, "found (level {level})"),
            LookupOutcome::NotFound => write!(f, "not found"),
            LookupOutcome::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// Response of `GET /players?game=..&game_player_id=..`. Only the account id is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerLookup {
    #[serde(default)]
    pub player_id: Option<String>,
}

/// Response of `GET /players/{player_id}`.
///
/// Game entries stay raw JSON; only the configured game is ever decoded, so
/// unexpected shapes under other games cannot fail the lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub games: Option<HashMap<String, serde_json::Value>>,
}

/// Per-game block of a player profile.
#[derive(Debug, Clone, Deserialize)]
pub struct GameDetails {
    #[serde(default)]
    pub skill_level: Option<u32>,
}

impl PlayerProfile {
    /// Rating under `games.<game>.skill_level`. A missing or `null` entry is `Ok(None)`.
    pub fn skill_level(&self, game: &str) -> serde_json::Result<Option<u32>> {
        match self.games.as_ref().and_then(|games| games.get(game)) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(entry) => Ok(GameDetails::deserialize(entry)?.skill_level),
        }
    }
}
