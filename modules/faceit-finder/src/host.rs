//! The seam between the lookup pipeline and the game server.
//!
//! Everything behind [`Host`] is owned by the tick loop. Implementations are
//! only ever called from tasks drained by [`TickQueue`](crate::tick::TickQueue).

/// Opaque reference to a connected player (slot / user id).
///
/// Only meaningful to the host. A handle can outlive the player it names,
/// which is why results are re-validated before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerHandle(pub u32);

/// Snapshot of a player's identity taken when a lookup is triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    /// SteamID64 as a string.
    pub platform_id: String,
    pub display_name: String,
}

impl PlayerIdentity {
    pub fn new(platform_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            platform_id: platform_id.into(),
            display_name: display_name.into(),
        }
    }
}

pub trait Host {
    /// Whether the handle still refers to a connected player with this platform id.
    ///
    /// Hosts recycle slots, so a handle alone is not enough: a result for a
    /// player who left must not be shown to whoever took their slot.
    fn is_player_valid(&self, player: PlayerHandle, platform_id: &str) -> bool;

    /// Send a chat line to one player.
    fn print_to_player(&mut self, player: PlayerHandle, message: &str);

    /// Send a chat line to everyone on the server.
    fn print_to_all(&mut self, message: &str);
}
