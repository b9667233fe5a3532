use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

/// Read side of the billing provider.
#[cfg_attr(test, mockall::automock)]
pub trait SubscriptionRepository: Send + Sync + 'static {
    fn has_paid(&self, user_id: String) -> impl Future<Output = Result<bool, CoreError>> + Send;
}

pub trait BillingPolicy: Send + Sync {
    /// Whether the user may use paid features right now.
    fn can_use_paid_features(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}
