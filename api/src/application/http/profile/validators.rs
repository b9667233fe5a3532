use std::collections::BTreeSet;

use caltrax_core::domain::profile::{
    entities::{ActivityLevel, Gender, Goal},
    value_objects::BiometricInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Biometric form. Missing fields are reported by name.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BiometricValidator {
    #[validate(range(min = 12.0, max = 120.0, message = "height_in must be between 12 and 120"))]
    pub height_in: Option<f64>,

    #[validate(range(min = 10.0, max = 500.0, message = "weight_kg must be between 10 and 500"))]
    pub weight_kg: Option<f64>,

    #[validate(range(min = 1, max = 120, message = "age_years must be between 1 and 120"))]
    pub age_years: Option<u32>,

    pub gender: Option<Gender>,

    pub activity_level: Option<ActivityLevel>,

    #[serde(default)]
    pub goals: BTreeSet<Goal>,

    #[serde(default)]
    #[validate(length(max = 20, message = "at most 20 dietary restrictions"))]
    pub dietary_restrictions: BTreeSet<String>,
}

impl From<BiometricValidator> for BiometricInput {
    fn from(payload: BiometricValidator) -> Self {
        BiometricInput {
            height_in: payload.height_in,
            weight_kg: payload.weight_kg,
            age_years: payload.age_years,
            gender: payload.gender,
            activity_level: payload.activity_level,
            goals: payload.goals,
            dietary_restrictions: payload
                .dietary_restrictions
                .into_iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }
}
