use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::dedupe::LookupDeduper;
use crate::host::{Host, PlayerHandle, PlayerIdentity};
use crate::report::{AnnounceSettings, LookupReport};
use crate::resolver::RatingResolver;
use crate::tick::Dispatcher;

/// Runs lookups off the tick loop and hands each outcome back to it.
pub struct LookupCoordinator<H> {
    resolver: Arc<dyn RatingResolver>,
    deduper: Arc<LookupDeduper>,
    dispatcher: Dispatcher<H>,
    runtime: Handle,
}

impl<H: Host + 'static> LookupCoordinator<H> {
    /// `runtime` is where lookups run; triggers may come from a thread outside it.
    pub fn new(
        resolver: Arc<dyn RatingResolver>,
        deduper: Arc<LookupDeduper>,
        dispatcher: Dispatcher<H>,
        runtime: Handle,
    ) -> Self {
        Self {
            resolver,
            deduper,
            dispatcher,
            runtime,
        }
    }

    pub fn deduper(&self) -> &Arc<LookupDeduper> {
        &self.deduper
    }

    /// Start a lookup unless one was already started for this platform id.
    ///
    /// Returns `None` when deduplicated. Otherwise the returned handle
    /// completes once the outcome has been posted to the tick queue, not once
    /// `on_result` has run. `on_result` is skipped if `player` is no longer
    /// valid when the tick loop picks the result up.
    pub fn trigger<F>(
        &self,
        player: PlayerHandle,
        identity: PlayerIdentity,
        settings: AnnounceSettings,
        on_result: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(&mut H, LookupReport) + Send + 'static,
    {
        if !self.deduper.try_claim(&identity.platform_id) {
            debug!(platform_id = %identity.platform_id, "Lookup already started, skipping");
            return None;
        }

        info!(
            platform_id = %identity.platform_id,
            player = %identity.display_name,
            "Starting FACEIT lookup"
        );

        let resolver = self.resolver.clone();
        let dispatcher = self.dispatcher.clone();

        Some(self.runtime.spawn(async move {
            let outcome = resolver.resolve(&identity).await;
            debug!(platform_id = %identity.platform_id, %outcome, "Lookup complete, posting to tick loop");

            dispatcher.post(move |host: &mut H| {
                if !host.is_player_valid(player, &identity.platform_id) {
                    debug!(
                        platform_id = %identity.platform_id,
                        "Player left before lookup finished, dropping result"
                    );
                    return;
                }
                on_result(
                    host,
                    LookupReport {
                        player,
                        identity,
                        outcome,
                        settings,
                    },
                );
            });
        }))
    }
}
