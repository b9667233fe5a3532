use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod policies;
pub mod services;

#[derive(Clone, Debug)]
pub struct CaltraxConfig {
    pub storage: LocalStorageConfig,
    pub database: Option<DatabaseConfig>,
    pub sync: SyncConfig,
    pub llm: LLMConfig,
    pub billing: BillingConfig,
}

#[derive(Clone, Debug)]
pub struct LocalStorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Upper bound for a single remote write attempt.
    pub timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
}

#[derive(Clone, Debug, Default)]
pub struct BillingConfig {
    pub require_subscription: bool,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

#[cfg(test)]
pub mod test_support;
