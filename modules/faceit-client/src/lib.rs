pub mod error;
pub mod types;

pub use error::{FaceitError, Result};
pub use types::{GameDetails, LookupOutcome, PlayerLookup, PlayerProfile};

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://open.faceit.com/data/v4";

/// Game tag used both as the `game` query parameter and the profile `games` key.
pub const DEFAULT_GAME: &str = "cs2";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response bodies are cut to this many characters before they reach logs or errors.
const BODY_SNIPPET_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: String,
    pub base_url: String,
    pub game: String,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            game: DEFAULT_GAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the FACEIT Data API.
///
/// Built once at startup and shared by every lookup; it holds the connection
/// pool and the API credential and is never mutated afterwards.
pub struct FaceitClient {
    client: reqwest::Client,
    base_url: Url,
    game: String,
    api_key: String,
}

impl FaceitClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| FaceitError::InvalidUrl(format!("{}: {e}", settings.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(FaceitError::InvalidUrl(settings.base_url));
        }

        Ok(Self {
            client,
            base_url,
            game: settings.game,
            api_key: settings.api_key,
        })
    }

    pub fn game(&self) -> &str {
        &self.game
    }

    /// Resolve a platform id to a skill level.
    ///
    /// Never returns an error: every failure is logged here and reported as
    /// [`LookupOutcome::Failed`].
    pub async fn resolve(&self, platform_id: &str, display_name: &str) -> LookupOutcome {
        match self.try_resolve(platform_id, display_name).await {
            Ok(outcome) => {
                info!(platform_id, %outcome, "FACEIT lookup finished");
                outcome
            }
            Err(e) => {
                warn!(platform_id, error = %e, "FACEIT lookup failed");
                LookupOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_resolve(&self, platform_id: &str, display_name: &str) -> Result<LookupOutcome> {
        let account = match self.find_account_id(platform_id).await {
            Ok(account) => account,
            Err(e) if e.is_client_error() => {
                warn!(platform_id, error = %e, "Lookup by platform id rejected, retrying with player name");
                self.find_account_id_by_name(platform_id, display_name)
                    .await?
            }
            Err(e) => return Err(e),
        };

        let Some(account_id) = account else {
            debug!(platform_id, "No FACEIT account linked");
            return Ok(LookupOutcome::NotFound);
        };
        debug!(platform_id, account_id = %account_id, "Resolved FACEIT account");

        match self.skill_level(&account_id).await? {
            Some(level) => Ok(LookupOutcome::Found { level }),
            None => {
                debug!(account_id = %account_id, game = %self.game, "Account has no rating for game");
                Ok(LookupOutcome::NotFound)
            }
        }
    }

    /// Look up the FACEIT account id linked to a platform id.
    /// A missing or empty `player_id` is `Ok(None)`.
    pub async fn find_account_id(&self, platform_id: &str) -> Result<Option<String>> {
        self.lookup_account(&[("game", self.game.as_str()), ("game_player_id", platform_id)])
            .await
    }

    /// Same as [`find_account_id`](Self::find_account_id), qualified by the player's display name.
    pub async fn find_account_id_by_name(
        &self,
        platform_id: &str,
        display_name: &str,
    ) -> Result<Option<String>> {
        self.lookup_account(&[
            ("game", self.game.as_str()),
            ("game_player_id", platform_id),
            ("game_player_name", display_name),
        ])
        .await
    }

    /// Fetch a player profile and return its rating for the configured game.
    pub async fn skill_level(&self, account_id: &str) -> Result<Option<u32>> {
        let url = self.endpoint(&["players", account_id]);
        debug!(url = %url, "Fetching FACEIT profile");

        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let profile: PlayerProfile = Self::parse_success(resp).await?;
        Ok(profile.skill_level(&self.game)?)
    }

    async fn lookup_account(&self, query: &[(&str, &str)]) -> Result<Option<String>> {
        let url = self.endpoint(&["players"]);
        debug!(url = %url, ?query, "Looking up FACEIT account");

        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;

        let lookup: PlayerLookup = Self::parse_success(resp).await?;
        Ok(lookup.player_id.filter(|id| !id.is_empty()))
    }

    /// Base URL plus path segments. Each segment is percent-encoded, so an
    /// id containing `/` or `?` stays a single segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn parse_success<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = snippet(&body);
            debug!(status = status.as_u16(), body = %message, "FACEIT API returned non-success");
            return Err(FaceitError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| FaceitError::Parse(format!("{e}; body: {}", snippet(&body))))
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}
