//! Host event handlers. The host calls these from its tick loop.

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::FinderConfig;
use crate::coordinator::LookupCoordinator;
use crate::host::{Host, PlayerHandle, PlayerIdentity};
use crate::report::{self, AnnounceSettings};

pub struct FinderPlugin<H> {
    coordinator: LookupCoordinator<H>,
    settings: AnnounceSettings,
    reset_seen_on_map_change: bool,
}

impl<H: Host + 'static> FinderPlugin<H> {
    pub fn new(coordinator: LookupCoordinator<H>, config: &FinderConfig) -> Self {
        Self {
            coordinator,
            settings: config.announce_settings(),
            reset_seen_on_map_change: config.reset_seen_on_map_change,
        }
    }

    /// Player finished connecting.
    pub fn on_player_connect_full(
        &self,
        host: &H,
        player: PlayerHandle,
        identity: PlayerIdentity,
    ) -> Option<JoinHandle<()>> {
        self.lookup("connect_full", host, player, identity)
    }

    /// Player spawned. Shares the seen set with connects, so this is usually a no-op.
    pub fn on_player_spawn(
        &self,
        host: &H,
        player: PlayerHandle,
        identity: PlayerIdentity,
    ) -> Option<JoinHandle<()>> {
        self.lookup("spawn", host, player, identity)
    }

    pub fn on_map_start(&self, map: &str) {
        if self.reset_seen_on_map_change {
            let forgotten = self.coordinator.deduper().len();
            self.coordinator.deduper().clear();
            info!(map, forgotten, "New map, cleared looked-up players");
        }
    }

    fn lookup(
        &self,
        event: &'static str,
        host: &H,
        player: PlayerHandle,
        identity: PlayerIdentity,
    ) -> Option<JoinHandle<()>> {
        if !host.is_player_valid(player, &identity.platform_id) {
            debug!(event, ?player, "Ignoring event for invalid player");
            return None;
        }
        // Bots report an empty or zero platform id.
        if identity.platform_id.is_empty() || identity.platform_id == "0" {
            debug!(event, player = %identity.display_name, "Ignoring player without platform id");
            return None;
        }

        debug!(
            event,
            player = %identity.display_name,
            platform_id = %identity.platform_id,
            "Player event"
        );
        self.coordinator
            .trigger(player, identity, self.settings, report::announce::<H>)
    }
}
