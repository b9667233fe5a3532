use caltrax_core::domain::ledger::{
    entities::{EntrySource, Nutrition},
    value_objects::NewFoodEntry,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::server::api_entities::api_error::ApiError;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct NutritionValidator {
    #[validate(range(min = 0.0, max = 20000.0, message = "calories must be between 0 and 20000"))]
    pub calories: f64,

    #[validate(range(min = 0.0, max = 2000.0, message = "protein_g must be between 0 and 2000"))]
    pub protein_g: f64,

    #[validate(range(min = 0.0, max = 2000.0, message = "fat_g must be between 0 and 2000"))]
    pub fat_g: f64,

    #[validate(range(min = 0.0, max = 2000.0, message = "carbs_g must be between 0 and 2000"))]
    pub carbs_g: f64,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddEntryValidator {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(nested)]
    pub nutrition: NutritionValidator,

    #[validate(range(min = 1.0, max = 10.0, message = "health_score must be between 1 and 10"))]
    pub health_score: Option<f64>,

    #[validate(range(min = 0.0, max = 1.0, message = "confidence must be between 0 and 1"))]
    pub confidence: Option<f64>,

    /// Defaults to `manual`.
    pub source: Option<EntrySource>,
}

impl From<AddEntryValidator> for NewFoodEntry {
    fn from(payload: AddEntryValidator) -> Self {
        let n = payload.nutrition;

        NewFoodEntry {
            name: payload.name.trim().to_string(),
            nutrition: Nutrition::new(n.calories, n.protein_g, n.fat_g, n.carbs_g),
            health_score: payload.health_score,
            confidence: payload.confidence,
            source: payload.source.unwrap_or(EntrySource::Manual),
        }
    }
}

/// Parses a `YYYY-MM-DD` path segment.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}
