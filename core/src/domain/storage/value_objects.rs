use serde::{Deserialize, Serialize};

use crate::domain::{ledger::entities::DayBucket, profile::entities::Profile};

/// A pending write to the remote store.
///
/// Jobs carry the full record so replaying one is idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncJob {
    UpsertProfile { profile: Profile },
    UpsertDay { user_id: String, bucket: DayBucket },
}

impl SyncJob {
    /// Jobs with the same key supersede each other.
    pub fn key(&self) -> String {
        match self {
            SyncJob::UpsertProfile { profile } => format!("profile:{}", profile.user_id),
            SyncJob::UpsertDay { user_id, bucket } => {
                format!("day:{}:{}", user_id, bucket.date.format("%Y-%m-%d"))
            }
        }
    }
}
