use tracing::info;

use crate::{
    domain::common::{CaltraxConfig, services::Service},
    infrastructure::{
        billing::subscription_repository::{PostgresSubscriptionRepository, SubscriptionBackend},
        db::postgres::Postgres,
        llm::openai_client::OpenAIVisionClient,
        remote::{PostgresRemoteStore, RemoteBackend},
        storage::FileKeyValueStore,
    },
};

pub type CaltraxService =
    Service<FileKeyValueStore, RemoteBackend, OpenAIVisionClient, SubscriptionBackend>;

/// Wires the production adapters together.
///
/// Without a database the service runs local-only with an open billing gate.
pub async fn create_service(config: CaltraxConfig) -> Result<CaltraxService, anyhow::Error> {
    let local_store = FileKeyValueStore::open(&config.storage.data_dir)?;
    info!(data_dir = %config.storage.data_dir.display(), "local store ready");

    let (remote_store, subscriptions) = match &config.database {
        Some(database) => {
            let postgres = Postgres::new(database).await?;
            (
                RemoteBackend::Postgres(PostgresRemoteStore::new(postgres.get_db())),
                SubscriptionBackend::Postgres(PostgresSubscriptionRepository::new(
                    postgres.get_db(),
                )),
            )
        }
        None => {
            info!("no database configured, remote sync and billing checks are off");
            (RemoteBackend::Disabled, SubscriptionBackend::Open)
        }
    };

    let llm_client = OpenAIVisionClient::new(&config.llm);

    Ok(Service::new(
        local_store,
        remote_store,
        llm_client,
        subscriptions,
        &config,
    ))
}
