//! Chat presentation of lookup outcomes. Runs on the tick loop only.

use faceit_client::LookupOutcome;
use tracing::{info, warn};

use crate::host::{Host, PlayerHandle, PlayerIdentity};

/// Green "[FACEIT Finder]" tag followed by default-colored text.
pub const CHAT_PREFIX: &str = " \u{4}[FACEIT Finder]\u{1} ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnounceSettings {
    pub minimum_level_to_announce: u32,
    pub notify_all_players: bool,
}

impl AnnounceSettings {
    /// Whether a level is announced to the whole server, not just its owner.
    pub fn broadcasts(&self, level: u32) -> bool {
        self.notify_all_players && level >= self.minimum_level_to_announce
    }
}

impl Default for AnnounceSettings {
    fn default() -> Self {
        Self {
            minimum_level_to_announce: 0,
            notify_all_players: true,
        }
    }
}

/// Everything a completed lookup hands back to the tick loop.
#[derive(Debug, Clone)]
pub struct LookupReport {
    pub player: PlayerHandle,
    pub identity: PlayerIdentity,
    pub outcome: LookupOutcome,
    pub settings: AnnounceSettings,
}

/// Default result handler: tell the player, and maybe the server.
pub fn announce<H: Host>(host: &mut H, report: LookupReport) {
    let LookupReport {
        player,
        identity,
        outcome,
        settings,
    } = report;

    match outcome {
        LookupOutcome::Found { level } => {
            host.print_to_player(player, &format!("{CHAT_PREFIX}Your FACEIT level is: {level}"));
            info!(player = %identity.display_name, level, "Reported FACEIT level");

            if settings.broadcasts(level) {
                host.print_to_all(&format!(
                    "{CHAT_PREFIX}Player {} has FACEIT level: {level}",
                    identity.display_name
                ));
            }
        }
        LookupOutcome::NotFound => {
            host.print_to_player(
                player,
                &format!("{CHAT_PREFIX}No FACEIT account found for your SteamID"),
            );
            info!(
                player = %identity.display_name,
                platform_id = %identity.platform_id,
                "No FACEIT account found"
            );
        }
        LookupOutcome::Failed { reason } => {
            warn!(
                player = %identity.display_name,
                platform_id = %identity.platform_id,
                reason = %reason,
                "FACEIT lookup failed, nothing reported to player"
            );
        }
    }
}
