use std::{collections::VecDeque, sync::Arc, time::Duration};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::domain::{
    common::{SyncConfig, entities::app_errors::CoreError},
    storage::{
        keys::SYNC_BACKLOG_KEY,
        ports::{KeyValueStore, RemoteStore},
        value_objects::SyncJob,
    },
};

enum SyncCommand {
    Job(SyncJob),
    Flush(oneshot::Sender<usize>),
}

/// Cheap handle used by services to hand writes to the sync worker.
///
/// Enqueueing never waits on the remote store.
#[derive(Clone, Debug, Default)]
pub struct RemoteSyncHandle {
    sender: Option<mpsc::UnboundedSender<SyncCommand>>,
}

impl std::fmt::Debug for SyncCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncCommand::Job(job) => write!(f, "Job({})", job.key()),
            SyncCommand::Flush(_) => write!(f, "Flush"),
        }
    }
}

impl RemoteSyncHandle {
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    pub fn enqueue(&self, job: SyncJob) {
        let Some(sender) = &self.sender else {
            debug!(key = %job.key(), "remote sync disabled, skipping");
            return;
        };

        if let Err(e) = sender.send(SyncCommand::Job(job)) {
            warn!(error = %e, "remote sync worker is gone, job dropped");
        }
    }

    /// Retries everything pending and returns how many jobs are still queued.
    pub async fn flush(&self) -> usize {
        let Some(sender) = &self.sender else {
            return 0;
        };

        let (reply, pending) = oneshot::channel();
        if sender.send(SyncCommand::Flush(reply)).is_err() {
            return 0;
        }
        pending.await.unwrap_or(0)
    }
}

/// Background worker that mirrors local writes to the remote store.
///
/// Failed jobs stay in a backlog (one job per record, newest wins) that is
/// persisted locally and retried on the next mutation, on flush and on start.
pub struct RemoteSync<KV, RS>
where
    KV: KeyValueStore,
    RS: RemoteStore,
{
    local_store: Arc<KV>,
    remote_store: Arc<RS>,
    timeout: Duration,
    backlog: VecDeque<SyncJob>,
    backlog_persisted: bool,
}

impl<KV, RS> RemoteSync<KV, RS>
where
    KV: KeyValueStore,
    RS: RemoteStore,
{
    pub fn spawn(local_store: Arc<KV>, remote_store: Arc<RS>, config: &SyncConfig) -> RemoteSyncHandle {
        if !remote_store.is_enabled() {
            info!("remote store disabled, running local-only");
            return RemoteSyncHandle::disabled();
        }

        let backlog = load_backlog(local_store.as_ref());
        if !backlog.is_empty() {
            info!(pending = backlog.len(), "restored remote sync backlog");
        }

        let worker = Self {
            backlog_persisted: !backlog.is_empty(),
            local_store,
            remote_store,
            timeout: config.timeout,
            backlog,
        };

        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(worker.run(receiver));

        RemoteSyncHandle {
            sender: Some(sender),
        }
    }

    async fn run(mut self, mut receiver: mpsc::UnboundedReceiver<SyncCommand>) {
        if !self.backlog.is_empty() {
            self.drain().await;
        }

        while let Some(command) = receiver.recv().await {
            match command {
                SyncCommand::Job(job) => {
                    self.push(job);
                    self.drain().await;
                }
                SyncCommand::Flush(reply) => {
                    self.drain().await;
                    let _ = reply.send(self.backlog.len());
                }
            }
        }

        debug!(pending = self.backlog.len(), "remote sync worker stopped");
    }

    fn push(&mut self, job: SyncJob) {
        let key = job.key();
        self.backlog.retain(|queued| queued.key() != key);
        self.backlog.push_back(job);
    }

    async fn drain(&mut self) {
        while let Some(job) = self.backlog.front() {
            let key = job.key();
            let outcome = tokio::time::timeout(self.timeout, self.send(job)).await;

            match outcome {
                Ok(Ok(())) => {
                    debug!(%key, "remote sync done");
                    self.backlog.pop_front();
                }
                Ok(Err(e)) => {
                    warn!(%key, error = %e, pending = self.backlog.len(), "remote sync failed, will retry later");
                    break;
                }
                Err(_) => {
                    warn!(%key, timeout_ms = self.timeout.as_millis() as u64, "remote sync timed out, will retry later");
                    break;
                }
            }
        }

        self.persist_backlog();
    }

    async fn send(&self, job: &SyncJob) -> Result<(), CoreError> {
        let result = match job {
            SyncJob::UpsertProfile { profile } => {
                self.remote_store.upsert_profile(profile.clone()).await
            }
            SyncJob::UpsertDay { user_id, bucket } => {
                self.remote_store
                    .upsert_day(user_id.clone(), bucket.clone())
                    .await
            }
        };

        result.map_err(|e| match e {
            CoreError::RemoteSyncFailed(_) => e,
            other => CoreError::RemoteSyncFailed(other.to_string()),
        })
    }

    fn persist_backlog(&mut self) {
        if self.backlog.is_empty() {
            if self.backlog_persisted {
                match self.local_store.remove(SYNC_BACKLOG_KEY) {
                    Ok(()) => self.backlog_persisted = false,
                    Err(e) => warn!(error = %e, "failed to clear remote sync backlog"),
                }
            }
            return;
        }

        let jobs: Vec<&SyncJob> = self.backlog.iter().collect();
        let serialized = match serde_json::to_string(&jobs) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!(error = %e, "failed to serialize remote sync backlog");
                return;
            }
        };

        match self.local_store.set(SYNC_BACKLOG_KEY, &serialized) {
            Ok(()) => self.backlog_persisted = true,
            Err(e) => warn!(error = %e, "failed to persist remote sync backlog"),
        }
    }
}

fn load_backlog<KV: KeyValueStore + ?Sized>(local_store: &KV) -> VecDeque<SyncJob> {
    let raw = match local_store.get(SYNC_BACKLOG_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return VecDeque::new(),
        Err(e) => {
            warn!(error = %e, "failed to read remote sync backlog");
            return VecDeque::new();
        }
    };

    match serde_json::from_str::<Vec<SyncJob>>(&raw) {
        Ok(jobs) => jobs.into(),
        Err(e) => {
            warn!(error = %e, "discarding unreadable remote sync backlog");
            VecDeque::new()
        }
    }
}
