use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ledger::{
        entities::{DayBucket, FoodEntry, WeekBucket},
        value_objects::{DayProgress, NewFoodEntry},
    },
};

/// Per-user food ledger. Local writes are authoritative; the remote copy is
/// updated in the background and its failures never reach the caller.
#[cfg_attr(test, mockall::automock)]
pub trait LedgerService: Send + Sync {
    fn add_entry(
        &self,
        user_id: String,
        date: NaiveDate,
        entry: NewFoodEntry,
    ) -> impl Future<Output = Result<FoodEntry, CoreError>> + Send;

    fn get_day(
        &self,
        user_id: String,
        date: NaiveDate,
    ) -> impl Future<Output = Result<DayBucket, CoreError>> + Send;

    /// Monday-anchored week containing `date`.
    fn get_week(
        &self,
        user_id: String,
        date: NaiveDate,
    ) -> impl Future<Output = Result<WeekBucket, CoreError>> + Send;

    /// `false` when the day or the entry does not exist.
    fn delete_entry(
        &self,
        user_id: String,
        date: NaiveDate,
        entry_id: Uuid,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn get_day_progress(
        &self,
        user_id: String,
        date: NaiveDate,
    ) -> impl Future<Output = Result<DayProgress, CoreError>> + Send;
}
