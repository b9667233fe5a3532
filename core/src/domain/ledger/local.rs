//! Read-modify-write cycles of the ledger against the local store.
//!
//! Everything here is synchronous; callers serialize access per store.

use chrono::NaiveDate;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ledger::{
        entities::{DayBucket, FoodEntry, WeekBucket},
        helpers::{week_dates, weekly_totals},
        value_objects::NewFoodEntry,
    },
    storage::{keys::day_key, ports::KeyValueStore},
};

pub fn load_day<KV: KeyValueStore + ?Sized>(
    store: &KV,
    user_id: &str,
    date: NaiveDate,
) -> Result<DayBucket, CoreError> {
    let key = day_key(user_id, date);
    let Some(raw) = store.get(&key)? else {
        return Ok(DayBucket::empty(date));
    };

    let mut bucket: DayBucket = serde_json::from_str(&raw).map_err(|e| {
        warn!(%key, error = %e, "stored day bucket is unreadable");
        CoreError::StorageUnavailable(format!("unreadable record {}", key))
    })?;

    // stored totals are never trusted
    bucket.date = date;
    bucket.recompute_totals();
    Ok(bucket)
}

pub fn save_day<KV: KeyValueStore + ?Sized>(
    store: &KV,
    user_id: &str,
    bucket: &DayBucket,
) -> Result<(), CoreError> {
    let serialized = serde_json::to_string(bucket).map_err(|e| {
        warn!(error = %e, "failed to serialize day bucket");
        CoreError::InternalServerError
    })?;

    store.set(&day_key(user_id, bucket.date), &serialized)
}

/// Appends a new entry and returns it with the updated bucket.
pub fn add_entry<KV: KeyValueStore + ?Sized>(
    store: &KV,
    user_id: &str,
    date: NaiveDate,
    new_entry: NewFoodEntry,
) -> Result<(FoodEntry, DayBucket), CoreError> {
    let mut bucket = load_day(store, user_id, date)?;
    let entry = FoodEntry::new(new_entry);

    bucket.push(entry.clone());
    save_day(store, user_id, &bucket)?;

    Ok((entry, bucket))
}

/// Returns the updated bucket, or `None` when nothing was removed.
pub fn delete_entry<KV: KeyValueStore + ?Sized>(
    store: &KV,
    user_id: &str,
    date: NaiveDate,
    entry_id: Uuid,
) -> Result<Option<DayBucket>, CoreError> {
    let mut bucket = load_day(store, user_id, date)?;

    if bucket.remove(entry_id).is_none() {
        return Ok(None);
    }

    save_day(store, user_id, &bucket)?;
    Ok(Some(bucket))
}

pub fn load_week<KV: KeyValueStore + ?Sized>(
    store: &KV,
    user_id: &str,
    any_date: NaiveDate,
) -> Result<WeekBucket, CoreError> {
    let dates = week_dates(any_date);

    let mut days = Vec::with_capacity(7);
    for date in dates {
        days.push(load_day(store, user_id, date)?);
    }

    let days: [DayBucket; 7] = days
        .try_into()
        .map_err(|_| CoreError::InternalServerError)?;

    Ok(WeekBucket {
        week_start: dates[0],
        weekly_totals: weekly_totals(&days),
        days,
    })
}
