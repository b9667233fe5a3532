use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::error;

use crate::domain::{billing::ports::SubscriptionRepository, common::entities::app_errors::CoreError};

/// Subscription statuses that unlock paid features.
const PAID_STATUSES: [&str; 2] = ["active", "trialing"];

#[derive(Debug, Clone)]
pub struct PostgresSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl PostgresSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn has_paid(&self, user_id: String) -> Result<bool, CoreError> {
        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            SELECT status
            FROM subscriptions
            WHERE user_id = $1
            "#,
            [user_id.into()],
        );

        let row = self.db.query_one(stmt).await.map_err(|e| {
            error!("Failed to read subscription: {}", e);
            CoreError::ExternalServiceError("billing lookup failed".to_string())
        })?;

        let status = row.and_then(|row| row.try_get::<String>("", "status").ok());

        Ok(status.is_some_and(|s| PAID_STATUSES.contains(&s.as_str())))
    }
}

/// Gate used at runtime: backed by the database when there is one, open otherwise.
#[derive(Debug, Clone)]
pub enum SubscriptionBackend {
    Postgres(PostgresSubscriptionRepository),
    Open,
}

impl SubscriptionRepository for SubscriptionBackend {
    async fn has_paid(&self, user_id: String) -> Result<bool, CoreError> {
        match self {
            SubscriptionBackend::Postgres(repository) => repository.has_paid(user_id).await,
            SubscriptionBackend::Open => Ok(true),
        }
    }
}
