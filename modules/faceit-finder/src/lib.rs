pub mod config;
pub mod coordinator;
pub mod dedupe;
pub mod error;
pub mod events;
pub mod host;
pub mod report;
pub mod resolver;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod tick;

pub use config::FinderConfig;
pub use coordinator::LookupCoordinator;
pub use dedupe::LookupDeduper;
pub use error::{FinderError, Result};
pub use events::FinderPlugin;
pub use faceit_client::LookupOutcome;
pub use host::{Host, PlayerHandle, PlayerIdentity};
pub use report::{AnnounceSettings, LookupReport};
pub use resolver::RatingResolver;
pub use tick::{Dispatcher, TickQueue};
