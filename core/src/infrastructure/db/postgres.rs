use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::{error, info};

use crate::domain::common::DatabaseConfig;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS profiles (
        user_id TEXT PRIMARY KEY,
        height_in DOUBLE PRECISION NOT NULL,
        weight_kg DOUBLE PRECISION NOT NULL,
        age_years INTEGER NOT NULL,
        gender TEXT NOT NULL,
        activity_level TEXT NOT NULL,
        goals JSONB NOT NULL DEFAULT '[]'::jsonb,
        dietary_restrictions JSONB NOT NULL DEFAULT '[]'::jsonb,
        calories INTEGER NOT NULL,
        protein_g INTEGER NOT NULL,
        fat_g INTEGER NOT NULL,
        carbs_g INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS food_entries (
        id UUID PRIMARY KEY,
        user_id TEXT NOT NULL,
        entry_date DATE NOT NULL,
        position INTEGER NOT NULL,
        logged_at TIMESTAMPTZ NOT NULL,
        name TEXT NOT NULL,
        calories DOUBLE PRECISION NOT NULL,
        protein_g DOUBLE PRECISION NOT NULL,
        fat_g DOUBLE PRECISION NOT NULL,
        carbs_g DOUBLE PRECISION NOT NULL,
        health_score DOUBLE PRECISION,
        confidence DOUBLE PRECISION,
        source TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS food_entries_user_date_idx
        ON food_entries (user_id, entry_date)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS subscriptions (
        user_id TEXT PRIMARY KEY,
        status TEXT NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

#[derive(Debug, Clone)]
pub struct Postgres {
    db: DatabaseConnection,
}

impl Postgres {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, anyhow::Error> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        let postgres = Self { db };
        postgres.ensure_schema().await?;

        info!("connected to postgres");
        Ok(postgres)
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }

    async fn ensure_schema(&self) -> Result<(), anyhow::Error> {
        for ddl in SCHEMA {
            let stmt = Statement::from_string(sea_orm::DatabaseBackend::Postgres, ddl.to_string());
            self.db.execute(stmt).await.map_err(|e| {
                error!("Failed to apply schema: {}", e);
                e
            })?;
        }
        Ok(())
    }
}
