use std::path::Path;
use std::time::Duration;

use faceit_client::{ClientSettings, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{FinderError, Result};
use crate::report::AnnounceSettings;

/// Value shipped in the generated config file; lookups will be rejected with it.
pub const PLACEHOLDER_API_KEY: &str = "apikeyhere";

/// Plugin configuration. Keys match the JSON file the server admin edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    #[serde(rename = "FaceitApiKey")]
    pub faceit_api_key: String,

    #[serde(rename = "NotifyAllPlayers")]
    pub notify_all_players: bool,

    #[serde(rename = "MinimumLevelToAnnounce")]
    pub minimum_level_to_announce: u32,

    #[serde(rename = "RequestTimeoutSecs")]
    pub request_timeout_secs: u64,

    #[serde(rename = "BaseUrl")]
    pub base_url: String,

    /// Forget looked-up players when a new map starts.
    #[serde(rename = "ResetSeenOnMapChange")]
    pub reset_seen_on_map_change: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            faceit_api_key: PLACEHOLDER_API_KEY.to_string(),
            notify_all_players: true,
            minimum_level_to_announce: 0,
            request_timeout_secs: 10,
            base_url: DEFAULT_BASE_URL.to_string(),
            reset_seen_on_map_change: false,
        }
    }
}

impl FinderConfig {
    /// Load from an optional JSON file, then apply `FACEIT_*` environment overrides.
    ///
    /// Env vars:
    /// - `FACEIT_API_KEY`
    /// - `FACEIT_NOTIFY_ALL` — `true` / `false`
    /// - `FACEIT_MIN_LEVEL`
    /// - `FACEIT_TIMEOUT_SECS`
    /// - `FACEIT_BASE_URL`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_json(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Apply overrides from any key/value source (the process env in production).
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(key) = var("FACEIT_API_KEY") {
            self.faceit_api_key = key;
        }
        if let Some(raw) = var("FACEIT_NOTIFY_ALL") {
            self.notify_all_players = parse_var("FACEIT_NOTIFY_ALL", &raw)?;
        }
        if let Some(raw) = var("FACEIT_MIN_LEVEL") {
            self.minimum_level_to_announce = parse_var("FACEIT_MIN_LEVEL", &raw)?;
        }
        if let Some(raw) = var("FACEIT_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_var("FACEIT_TIMEOUT_SECS", &raw)?;
        }
        if let Some(url) = var("FACEIT_BASE_URL") {
            self.base_url = url;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.faceit_api_key.trim().is_empty() {
            return Err(FinderError::Config("FaceitApiKey must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(FinderError::Config(
                "RequestTimeoutSecs must be greater than zero".into(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(FinderError::Config("BaseUrl must not be empty".into()));
        }
        if self.faceit_api_key == PLACEHOLDER_API_KEY {
            warn!("FaceitApiKey is still the placeholder value, lookups will fail");
        }
        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings::new(self.faceit_api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    pub fn announce_settings(&self) -> AnnounceSettings {
        AnnounceSettings {
            minimum_level_to_announce: self.minimum_level_to_announce,
            notify_all_players: self.notify_all_players,
        }
    }

    pub fn log_redacted(&self) {
        let key = &self.faceit_api_key;
        let shown: String = key.chars().take(4).collect();
        let preview = format!("{shown}...({} chars)", key.chars().count());
        info!(
            api_key = %preview,
            notify_all_players = self.notify_all_players,
            minimum_level_to_announce = self.minimum_level_to_announce,
            request_timeout_secs = self.request_timeout_secs,
            base_url = %self.base_url,
            reset_seen_on_map_change = self.reset_seen_on_map_change,
            "Config loaded"
        );
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| FinderError::Config(format!("{key} has an invalid value: {raw:?}")))
}
