use std::sync::{Arc, Mutex};

use crate::domain::{
    billing::ports::SubscriptionRepository,
    common::{BillingConfig, CaltraxConfig, SyncConfig, entities::app_errors::CoreError},
    food_analysis::ports::LLMClient,
    storage::{
        ports::{KeyValueStore, RemoteStore},
        services::{RemoteSync, RemoteSyncHandle},
    },
};

pub struct Service<KV, RS, LLM, SR>
where
    KV: KeyValueStore,
    RS: RemoteStore,
    LLM: LLMClient,
    SR: SubscriptionRepository,
{
    pub(crate) local_store: Arc<KV>,
    pub(crate) remote_store: Arc<RS>,
    pub(crate) remote_sync: RemoteSyncHandle,
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) subscription_repository: Arc<SR>,
    pub(crate) billing: BillingConfig,
    pub(crate) sync: SyncConfig,
    local_lock: Arc<Mutex<()>>,
}

impl<KV, RS, LLM, SR> Service<KV, RS, LLM, SR>
where
    KV: KeyValueStore,
    RS: RemoteStore,
    LLM: LLMClient,
    SR: SubscriptionRepository,
{
    /// Builds the service and starts the remote sync worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        local_store: KV,
        remote_store: RS,
        llm_client: LLM,
        subscription_repository: SR,
        config: &CaltraxConfig,
    ) -> Self {
        let local_store = Arc::new(local_store);
        let remote_store = Arc::new(remote_store);
        let remote_sync = RemoteSync::spawn(local_store.clone(), remote_store.clone(), &config.sync);

        Self {
            local_store,
            remote_store,
            remote_sync,
            llm_client: Arc::new(llm_client),
            subscription_repository: Arc::new(subscription_repository),
            billing: config.billing.clone(),
            sync: config.sync.clone(),
            local_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Runs a read-modify-write cycle against the local store.
    ///
    /// Cycles are serialized; the lock is never held across an await.
    pub(crate) fn with_local<T>(
        &self,
        cycle: impl FnOnce(&KV) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let _guard = self
            .local_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        cycle(self.local_store.as_ref())
    }

    /// Retries pending remote writes, returning how many are still queued.
    pub async fn flush_remote_sync(&self) -> usize {
        self.remote_sync.flush().await
    }
}

impl<KV, RS, LLM, SR> Clone for Service<KV, RS, LLM, SR>
where
    KV: KeyValueStore,
    RS: RemoteStore,
    LLM: LLMClient,
    SR: SubscriptionRepository,
{
    fn clone(&self) -> Self {
        Self {
            local_store: self.local_store.clone(),
            remote_store: self.remote_store.clone(),
            remote_sync: self.remote_sync.clone(),
            llm_client: self.llm_client.clone(),
            subscription_repository: self.subscription_repository.clone(),
            billing: self.billing.clone(),
            sync: self.sync.clone(),
            local_lock: self.local_lock.clone(),
        }
    }
}
