use sea_orm::{
    ConnectionTrait, DatabaseConnection, QueryResult, Statement, TransactionTrait,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ledger::entities::DayBucket,
    profile::entities::{Macros, Profile},
    storage::ports::RemoteStore,
};

/// Hosted mirror of profiles and day buckets.
#[derive(Debug, Clone)]
pub struct PostgresRemoteStore {
    pub db: DatabaseConnection,
}

impl PostgresRemoteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sync_failed(context: &str, e: impl std::fmt::Display) -> CoreError {
    error!("{}: {}", context, e);
    CoreError::RemoteSyncFailed(format!("{}: {}", context, e))
}

// enums are stored with their wire names
fn to_text<T: Serialize>(value: &T) -> Result<String, CoreError> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => Ok(s),
        Ok(other) => Err(CoreError::Invalid(format!("not a text value: {}", other))),
        Err(e) => Err(sync_failed("Failed to encode value", e)),
    }
}

fn from_text<T: DeserializeOwned>(text: String) -> Result<T, CoreError> {
    serde_json::from_value(serde_json::Value::String(text))
        .map_err(|e| sync_failed("Failed to decode stored value", e))
}

fn column<T: sea_orm::TryGetable>(row: &QueryResult, name: &str) -> Result<T, CoreError> {
    row.try_get::<T>("", name)
        .map_err(|e| sync_failed(&format!("Failed to read column {}", name), e))
}

fn profile_from_row(row: &QueryResult) -> Result<Profile, CoreError> {
    let goals: serde_json::Value = column(row, "goals")?;
    let dietary_restrictions: serde_json::Value = column(row, "dietary_restrictions")?;

    Ok(Profile {
        user_id: column(row, "user_id")?,
        height_in: column(row, "height_in")?,
        weight_kg: column(row, "weight_kg")?,
        age_years: column::<i32>(row, "age_years")?.max(0) as u32,
        gender: from_text(column(row, "gender")?)?,
        activity_level: from_text(column(row, "activity_level")?)?,
        goals: serde_json::from_value(goals)
            .map_err(|e| sync_failed("Failed to decode goals", e))?,
        dietary_restrictions: serde_json::from_value(dietary_restrictions)
            .map_err(|e| sync_failed("Failed to decode dietary restrictions", e))?,
        calories: column::<i32>(row, "calories")?.max(0) as u32,
        macros: Macros {
            protein_g: column::<i32>(row, "protein_g")?.max(0) as u32,
            fat_g: column::<i32>(row, "fat_g")?.max(0) as u32,
            carbs_g: column::<i32>(row, "carbs_g")?.max(0) as u32,
        },
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}

impl RemoteStore for PostgresRemoteStore {
    async fn upsert_profile(&self, profile: Profile) -> Result<(), CoreError> {
        let goals = serde_json::to_value(&profile.goals)
            .map_err(|e| sync_failed("Failed to encode goals", e))?;
        let dietary_restrictions = serde_json::to_value(&profile.dietary_restrictions)
            .map_err(|e| sync_failed("Failed to encode dietary restrictions", e))?;

        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            INSERT INTO profiles (
                user_id, height_in, weight_kg, age_years, gender, activity_level,
                goals, dietary_restrictions, calories, protein_g, fat_g, carbs_g,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (user_id) DO UPDATE SET
                height_in = EXCLUDED.height_in,
                weight_kg = EXCLUDED.weight_kg,
                age_years = EXCLUDED.age_years,
                gender = EXCLUDED.gender,
                activity_level = EXCLUDED.activity_level,
                goals = EXCLUDED.goals,
                dietary_restrictions = EXCLUDED.dietary_restrictions,
                calories = EXCLUDED.calories,
                protein_g = EXCLUDED.protein_g,
                fat_g = EXCLUDED.fat_g,
                carbs_g = EXCLUDED.carbs_g,
                updated_at = EXCLUDED.updated_at
            "#,
            [
                profile.user_id.clone().into(),
                profile.height_in.into(),
                profile.weight_kg.into(),
                (profile.age_years as i32).into(),
                to_text(&profile.gender)?.into(),
                to_text(&profile.activity_level)?.into(),
                goals.into(),
                dietary_restrictions.into(),
                (profile.calories as i32).into(),
                (profile.macros.protein_g as i32).into(),
                (profile.macros.fat_g as i32).into(),
                (profile.macros.carbs_g as i32).into(),
                profile.created_at.into(),
                profile.updated_at.into(),
            ],
        );

        self.db
            .execute(stmt)
            .await
            .map_err(|e| sync_failed("Failed to upsert profile", e))?;

        Ok(())
    }

    async fn upsert_day(&self, user_id: String, bucket: DayBucket) -> Result<(), CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| sync_failed("Failed to open transaction", e))?;

        let clear = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            DELETE FROM food_entries
            WHERE user_id = $1 AND entry_date = $2
            "#,
            [user_id.clone().into(), bucket.date.into()],
        );
        txn.execute(clear)
            .await
            .map_err(|e| sync_failed("Failed to clear day", e))?;

        for (position, entry) in bucket.entries.iter().enumerate() {
            let insert = Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                r#"
                INSERT INTO food_entries (
                    id, user_id, entry_date, position, logged_at, name,
                    calories, protein_g, fat_g, carbs_g, health_score, confidence, source
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                "#,
                [
                    entry.id.into(),
                    user_id.clone().into(),
                    bucket.date.into(),
                    (position as i32).into(),
                    entry.timestamp.into(),
                    entry.name.clone().into(),
                    entry.nutrition.calories.into(),
                    entry.nutrition.protein_g.into(),
                    entry.nutrition.fat_g.into(),
                    entry.nutrition.carbs_g.into(),
                    entry.health_score.into(),
                    entry.confidence.into(),
                    to_text(&entry.source)?.into(),
                ],
            );

            txn.execute(insert)
                .await
                .map_err(|e| sync_failed("Failed to insert food entry", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| sync_failed("Failed to commit day", e))
    }

    async fn fetch_profile(&self, user_id: String) -> Result<Option<Profile>, CoreError> {
        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            SELECT user_id, height_in, weight_kg, age_years, gender, activity_level,
                   goals, dietary_restrictions, calories, protein_g, fat_g, carbs_g,
                   created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
            [user_id.into()],
        );

        let row = self
            .db
            .query_one(stmt)
            .await
            .map_err(|e| sync_failed("Failed to fetch profile", e))?;

        row.as_ref().map(profile_from_row).transpose()
    }
}

/// Remote store used at runtime; `Disabled` keeps the app local-only.
#[derive(Debug, Clone)]
pub enum RemoteBackend {
    Postgres(PostgresRemoteStore),
    Disabled,
}

impl RemoteStore for RemoteBackend {
    fn is_enabled(&self) -> bool {
        matches!(self, RemoteBackend::Postgres(_))
    }

    async fn upsert_profile(&self, profile: Profile) -> Result<(), CoreError> {
        match self {
            RemoteBackend::Postgres(store) => store.upsert_profile(profile).await,
            RemoteBackend::Disabled => Ok(()),
        }
    }

    async fn upsert_day(&self, user_id: String, bucket: DayBucket) -> Result<(), CoreError> {
        match self {
            RemoteBackend::Postgres(store) => store.upsert_day(user_id, bucket).await,
            RemoteBackend::Disabled => Ok(()),
        }
    }

    async fn fetch_profile(&self, user_id: String) -> Result<Option<Profile>, CoreError> {
        match self {
            RemoteBackend::Postgres(store) => store.fetch_profile(user_id).await,
            RemoteBackend::Disabled => Ok(None),
        }
    }
}
