// Test doubles for the lookup pipeline.
//
// - MockResolver (RatingResolver) — HashMap-based platform id → outcome,
//   records every call, optionally blocks until released
// - RecordingHost (Host) — in-memory slots and chat log

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use faceit_client::LookupOutcome;
use tokio::sync::Semaphore;

use crate::host::{Host, PlayerHandle, PlayerIdentity};
use crate::resolver::RatingResolver;

// ---------------------------------------------------------------------------
// MockResolver
// ---------------------------------------------------------------------------

/// Returns `NotFound` for unregistered ids.
/// Builder pattern: `.on_id()`, `.gated()`.
pub struct MockResolver {
    outcomes: HashMap<String, LookupOutcome>,
    calls: Mutex<Vec<String>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn on_id(mut self, platform_id: &str, outcome: LookupOutcome) -> Self {
        self.outcomes.insert(platform_id.to_string(), outcome);
        self
    }

    /// Hold every resolve until a permit is added to the returned semaphore.
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(gate.clone());
        (self, gate)
    }

    /// Platform ids passed to `resolve`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RatingResolver for MockResolver {
    async fn resolve(&self, identity: &PlayerIdentity) -> LookupOutcome {
        self.calls
            .lock()
            .unwrap()
            .push(identity.platform_id.clone());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        self.outcomes
            .get(&identity.platform_id)
            .cloned()
            .unwrap_or(LookupOutcome::NotFound)
    }
}

// ---------------------------------------------------------------------------
// RecordingHost
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingHost {
    next_slot: u32,
    /// Slot → platform id of its current occupant.
    connected: HashMap<PlayerHandle, String>,
    pub player_messages: Vec<(PlayerHandle, String)>,
    pub broadcasts: Vec<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, platform_id: &str) -> PlayerHandle {
        let handle = PlayerHandle(self.next_slot);
        self.next_slot += 1;
        self.connected.insert(handle, platform_id.to_string());
        handle
    }

    /// Seat a new player in a slot that may have belonged to someone else.
    pub fn connect_in_slot(&mut self, player: PlayerHandle, platform_id: &str) {
        self.connected.insert(player, platform_id.to_string());
    }

    pub fn disconnect(&mut self, player: PlayerHandle) {
        self.connected.remove(&player);
    }

    pub fn messages_for(&self, player: PlayerHandle) -> Vec<String> {
        self.player_messages
            .iter()
            .filter(|(p, _)| *p == player)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Host for RecordingHost {
    fn is_player_valid(&self, player: PlayerHandle, platform_id: &str) -> bool {
        self.connected
            .get(&player)
            .is_some_and(|occupant| occupant == platform_id)
    }

    fn print_to_player(&mut self, player: PlayerHandle, message: &str) {
        assert!(
            self.connected.contains_key(&player),
            "wrote to disconnected player {player:?}"
        );
        self.player_messages.push((player, message.to_string()));
    }

    fn print_to_all(&mut self, message: &str) {
        self.broadcasts.push(message.to_string());
    }
}
