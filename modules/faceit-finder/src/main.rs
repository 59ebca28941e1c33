use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use faceit_client::FaceitClient;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use faceit_finder::{
    tick, FinderConfig, FinderPlugin, Host, LookupCoordinator, LookupDeduper, PlayerHandle,
    PlayerIdentity,
};

#[derive(Parser)]
#[command(
    name = "faceit-finder",
    about = "Look up a player's FACEIT level through a simulated server tick loop"
)]
struct Cli {
    /// Path to the plugin's JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// SteamID64 of the player
    #[arg(long)]
    steam_id: String,

    /// Display name, used by the name-qualified fallback lookup
    #[arg(long, default_value = "player")]
    name: String,

    /// Tick interval in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Give up after this many seconds without a result
    #[arg(long, default_value_t = 15)]
    wait_secs: u64,
}

/// Single-player host that writes chat to stdout.
struct ConsoleHost {
    player: PlayerHandle,
    platform_id: String,
}

impl Host for ConsoleHost {
    fn is_player_valid(&self, player: PlayerHandle, platform_id: &str) -> bool {
        player == self.player && platform_id == self.platform_id
    }

    fn print_to_player(&mut self, player: PlayerHandle, message: &str) {
        println!("[to {}] {}", player.0, strip_colors(message));
    }

    fn print_to_all(&mut self, message: &str) {
        println!("[all] {}", strip_colors(message));
    }
}

fn strip_colors(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("faceit=info".parse()?))
        .init();

    let cli = Cli::parse();

    let config = FinderConfig::load(cli.config.as_deref())?;
    config.log_redacted();

    let client = FaceitClient::new(config.client_settings())?;
    let (dispatcher, mut queue) = tick::dispatcher::<ConsoleHost>();
    let coordinator = LookupCoordinator::new(
        Arc::new(client),
        Arc::new(LookupDeduper::new()),
        dispatcher,
        Handle::current(),
    );
    let plugin = FinderPlugin::new(coordinator, &config);

    let mut host = ConsoleHost {
        player: PlayerHandle(1),
        platform_id: cli.steam_id.clone(),
    };
    let identity = PlayerIdentity::new(cli.steam_id, cli.name);

    // Same sequence a real server sees: full connect, then first spawn.
    plugin.on_player_connect_full(&host, host.player, identity.clone());
    plugin.on_player_spawn(&host, host.player, identity);

    let deadline = Instant::now() + Duration::from_secs(cli.wait_secs);
    let mut ticker = tokio::time::interval(Duration::from_millis(cli.tick_ms.max(1)));
    loop {
        ticker.tick().await;
        if queue.drain(&mut host) > 0 {
            info!("Lookup reported");
            break;
        }
        if Instant::now() >= deadline {
            warn!(wait_secs = cli.wait_secs, "No result before deadline");
            break;
        }
    }

    Ok(())
}
