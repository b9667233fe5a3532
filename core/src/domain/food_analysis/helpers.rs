use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde_json::Value;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ledger::{
        entities::{EntrySource, Nutrition},
        value_objects::NewFoodEntry,
    },
};

/// Widest real-world offset from UTC is +14:00.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Day an analyzed meal is logged on: the explicit date, or the caller's
/// current calendar day.
pub fn entry_date(
    date: Option<NaiveDate>,
    utc_offset_minutes: Option<i32>,
    now: DateTime<Utc>,
) -> Result<NaiveDate, CoreError> {
    if let Some(date) = date {
        return Ok(date);
    }

    let minutes = utc_offset_minutes.unwrap_or(0);
    if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        return Err(CoreError::Invalid(format!(
            "utc offset out of range: {} minutes",
            minutes
        )));
    }

    let offset = FixedOffset::east_opt(minutes * 60)
        .ok_or_else(|| CoreError::Invalid(format!("invalid utc offset: {} minutes", minutes)))?;

    Ok(now.with_timezone(&offset).date_naive())
}

const UNNAMED_FOOD: &str = "Unknown food";

/// Coerces a recognition payload into a vision entry.
///
/// Missing or non-numeric nutrition fields become 0. Optional scores that
/// cannot be read are dropped; readable ones are clamped by `FoodEntry::new`.
pub fn recognition_to_entry(payload: &Value) -> NewFoodEntry {
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNNAMED_FOOD)
        .to_string();

    let nutrition = payload.get("nutrition").unwrap_or(&Value::Null);

    NewFoodEntry {
        name,
        nutrition: Nutrition::new(
            number_or_zero(nutrition.get("calories")),
            number_or_zero(nutrition.get("protein_g")),
            number_or_zero(nutrition.get("fat_g")),
            number_or_zero(nutrition.get("carbs_g")),
        ),
        health_score: number(payload.get("health_score")),
        confidence: number(payload.get("confidence")),
        source: EntrySource::Vision,
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn number_or_zero(value: Option<&Value>) -> f64 {
    number(value).unwrap_or(0.0)
}
