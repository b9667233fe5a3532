use chrono::NaiveDate;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    billing::ports::SubscriptionRepository,
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::ports::LLMClient,
    ledger::{
        entities::{DayBucket, FoodEntry, WeekBucket},
        local,
        ports::LedgerService,
        value_objects::{DayProgress, MacroProgress, NewFoodEntry},
    },
    profile::ports::ProfileService,
    storage::{
        ports::{KeyValueStore, RemoteStore},
        value_objects::SyncJob,
    },
};

impl<KV, RS, LLM, SR> LedgerService for Service<KV, RS, LLM, SR>
where
    KV: KeyValueStore,
    RS: RemoteStore,
    LLM: LLMClient,
    SR: SubscriptionRepository,
{
    #[instrument(skip(self, entry))]
    async fn add_entry(
        &self,
        user_id: String,
        date: NaiveDate,
        entry: NewFoodEntry,
    ) -> Result<FoodEntry, CoreError> {
        // enqueue under the local lock so remote snapshots arrive in commit order
        let entry = self.with_local(|store| {
            let (entry, bucket) = local::add_entry(store, &user_id, date, entry)?;
            self.remote_sync.enqueue(SyncJob::UpsertDay {
                user_id: user_id.clone(),
                bucket,
            });
            Ok(entry)
        })?;

        info!(entry_id = %entry.id, source = ?entry.source, "food entry recorded");
        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn get_day(&self, user_id: String, date: NaiveDate) -> Result<DayBucket, CoreError> {
        self.with_local(|store| local::load_day(store, &user_id, date))
    }

    #[instrument(skip(self))]
    async fn get_week(&self, user_id: String, date: NaiveDate) -> Result<WeekBucket, CoreError> {
        self.with_local(|store| local::load_week(store, &user_id, date))
    }

    #[instrument(skip(self))]
    async fn delete_entry(
        &self,
        user_id: String,
        date: NaiveDate,
        entry_id: Uuid,
    ) -> Result<bool, CoreError> {
        let deleted = self.with_local(|store| {
            let Some(bucket) = local::delete_entry(store, &user_id, date, entry_id)? else {
                return Ok(false);
            };
            self.remote_sync.enqueue(SyncJob::UpsertDay {
                user_id: user_id.clone(),
                bucket,
            });
            Ok(true)
        })?;

        if deleted {
            info!("food entry deleted");
        } else {
            info!("entry not found, nothing to delete");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn get_day_progress(
        &self,
        user_id: String,
        date: NaiveDate,
    ) -> Result<DayProgress, CoreError> {
        let day = self.with_local(|store| local::load_day(store, &user_id, date))?;
        let profile = self.get_profile(user_id).await?;

        let progress = profile.map(|p| MacroProgress::new(&day.totals, p.calories, &p.macros));

        Ok(DayProgress { day, progress })
    }
}
