use async_trait::async_trait;
use faceit_client::{FaceitClient, LookupOutcome};

use crate::host::PlayerIdentity;

/// Source of skill levels. Must never fail: errors are folded into the outcome.
#[async_trait]
pub trait RatingResolver: Send + Sync {
    async fn resolve(&self, identity: &PlayerIdentity) -> LookupOutcome;
}

#[async_trait]
impl RatingResolver for FaceitClient {
    async fn resolve(&self, identity: &PlayerIdentity) -> LookupOutcome {
        FaceitClient::resolve(self, &identity.platform_id, &identity.display_name).await
    }
}
