use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::NaiveDate;

use crate::{
    domain::{
        billing::ports::SubscriptionRepository,
        common::{
            BillingConfig, CaltraxConfig, LLMConfig, LocalStorageConfig, SyncConfig,
            entities::app_errors::CoreError, services::Service,
        },
        food_analysis::ports::LLMClient,
        ledger::entities::DayBucket,
        profile::entities::Profile,
        storage::ports::{KeyValueStore, RemoteStore},
    },
    infrastructure::storage::InMemoryKeyValueStore,
};

/// Remote store double that records successful writes and can be told to fail or hang.
#[derive(Default)]
pub struct RecordingRemoteStore {
    pub failing: AtomicBool,
    pub stalled: AtomicBool,
    /// Extra latency on profile lookups, in milliseconds.
    pub fetch_delay_ms: AtomicU64,
    pub profiles: Mutex<HashMap<String, Profile>>,
    day_writes: Mutex<Vec<(String, NaiveDate)>>,
    days: Mutex<HashMap<(String, NaiveDate), DayBucket>>,
}

impl RecordingRemoteStore {
    pub fn day_writes(&self) -> Vec<(String, NaiveDate)> {
        self.day_writes.lock().unwrap().clone()
    }

    /// Last bucket written for the given day.
    pub fn day(&self, user_id: &str, date: NaiveDate) -> Option<DayBucket> {
        self.days
            .lock()
            .unwrap()
            .get(&(user_id.to_string(), date))
            .cloned()
    }

    async fn gate(&self) -> Result<(), CoreError> {
        if self.stalled.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::RemoteSyncFailed("connection refused".to_string()));
        }
        Ok(())
    }
}

impl RemoteStore for RecordingRemoteStore {
    async fn upsert_profile(&self, profile: Profile) -> Result<(), CoreError> {
        self.gate().await?;
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id.clone(), profile);
        Ok(())
    }

    async fn upsert_day(&self, user_id: String, bucket: DayBucket) -> Result<(), CoreError> {
        self.gate().await?;
        self.day_writes
            .lock()
            .unwrap()
            .push((user_id.clone(), bucket.date));
        self.days
            .lock()
            .unwrap()
            .insert((user_id, bucket.date), bucket);
        Ok(())
    }

    async fn fetch_profile(&self, user_id: String) -> Result<Option<Profile>, CoreError> {
        let profile = self.profiles.lock().unwrap().get(&user_id).cloned();
        let delay = self.fetch_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.gate().await?;
        Ok(profile)
    }
}

/// Vision client double returning a canned JSON body.
pub struct CannedLLMClient {
    pub response: Result<String, CoreError>,
}

impl LLMClient for CannedLLMClient {
    async fn generate_with_image(
        &self,
        _prompt: String,
        _image_data: Vec<u8>,
        _mime_type: String,
        _response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        self.response.clone()
    }
}

pub struct FixedSubscriptions {
    pub has_paid: bool,
}

impl SubscriptionRepository for FixedSubscriptions {
    async fn has_paid(&self, _user_id: String) -> Result<bool, CoreError> {
        Ok(self.has_paid)
    }
}

pub fn test_config() -> CaltraxConfig {
    CaltraxConfig {
        storage: LocalStorageConfig {
            data_dir: std::env::temp_dir(),
        },
        database: None,
        sync: SyncConfig {
            timeout: Duration::from_millis(200),
        },
        llm: LLMConfig {
            openai_api_key: "test-key".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            openai_base_url: "http://localhost:0".to_string(),
        },
        billing: BillingConfig::default(),
    }
}

pub type TestService<KV = InMemoryKeyValueStore> =
    Service<KV, RecordingRemoteStore, CannedLLMClient, FixedSubscriptions>;

/// Service over the given local store, a healthy recording remote store, an
/// LLM answering `{}` and a paid-up subscription.
pub fn test_service_with<KV: KeyValueStore>(local_store: KV) -> TestService<KV> {
    Service::new(
        local_store,
        RecordingRemoteStore::default(),
        CannedLLMClient {
            response: Ok("{}".to_string()),
        },
        FixedSubscriptions { has_paid: true },
        &test_config(),
    )
}

pub fn test_service() -> TestService {
    test_service_with(InMemoryKeyValueStore::default())
}
