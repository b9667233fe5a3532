use tracing::debug;

use crate::domain::{
    billing::ports::{BillingPolicy, SubscriptionRepository},
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::ports::LLMClient,
    storage::ports::{KeyValueStore, RemoteStore},
};

impl<KV, RS, LLM, SR> BillingPolicy for Service<KV, RS, LLM, SR>
where
    KV: KeyValueStore,
    RS: RemoteStore,
    LLM: LLMClient,
    SR: SubscriptionRepository,
{
    async fn can_use_paid_features(&self, user_id: String) -> Result<bool, CoreError> {
        if !self.billing.require_subscription {
            return Ok(true);
        }

        let has_paid = self.subscription_repository.has_paid(user_id.clone()).await?;
        debug!(%user_id, has_paid, "subscription checked");
        Ok(has_paid)
    }
}
