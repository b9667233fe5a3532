use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, ledger::entities::DayBucket,
    profile::entities::Profile,
};

/// Port for the local key-value store the ledger and profile cache live in.
///
/// Implementations are synchronous: a local write either succeeds before the
/// caller continues or fails with [`CoreError::StorageUnavailable`].
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;

    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// Port for the hosted store that mirrors profiles and day buckets.
#[cfg_attr(test, mockall::automock)]
pub trait RemoteStore: Send + Sync + 'static {
    /// Whether writes should be attempted at all.
    fn is_enabled(&self) -> bool {
        true
    }

    fn upsert_profile(
        &self,
        profile: Profile,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Replaces the remote entries of `bucket.date` with `bucket.entries`.
    fn upsert_day(
        &self,
        user_id: String,
        bucket: DayBucket,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn fetch_profile(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<Option<Profile>, CoreError>> + Send;
}
