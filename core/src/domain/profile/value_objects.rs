use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError,
    profile::entities::{ActivityLevel, Gender, Goal},
};

/// Biometric form as submitted; every field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BiometricInput {
    pub height_in: Option<f64>,
    pub weight_kg: Option<f64>,
    pub age_years: Option<u32>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub goals: BTreeSet<Goal>,
    #[serde(default)]
    pub dietary_restrictions: BTreeSet<String>,
}

/// A biometric form with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct Biometrics {
    pub height_in: f64,
    pub weight_kg: f64,
    pub age_years: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub goals: BTreeSet<Goal>,
}

impl Biometrics {
    pub fn has_loss_goal(&self) -> bool {
        self.goals.iter().any(|g| g.is_loss())
    }

    pub fn has_gain_goal(&self) -> bool {
        self.goals.iter().any(|g| g.is_gain())
    }
}

impl TryFrom<&BiometricInput> for Biometrics {
    type Error = CoreError;

    fn try_from(input: &BiometricInput) -> Result<Self, Self::Error> {
        Ok(Self {
            height_in: positive(input.height_in, "height_in")?,
            weight_kg: positive(input.weight_kg, "weight_kg")?,
            age_years: input
                .age_years
                .filter(|age| *age > 0)
                .ok_or(CoreError::MissingField("age_years"))?,
            gender: input.gender.ok_or(CoreError::MissingField("gender"))?,
            activity_level: input
                .activity_level
                .ok_or(CoreError::MissingField("activity_level"))?,
            goals: input.goals.clone(),
        })
    }
}

// zero, negative and non-finite values count as not filled in
fn positive(value: Option<f64>, field: &'static str) -> Result<f64, CoreError> {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or(CoreError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> BiometricInput {
        BiometricInput {
            height_in: Some(70.0),
            weight_kg: Some(70.0),
            age_years: Some(25),
            gender: Some(Gender::Male),
            activity_level: Some(ActivityLevel::Moderate),
            ..Default::default()
        }
    }

    #[test]
    fn complete_input_is_accepted() {
        assert!(Biometrics::try_from(&complete()).is_ok());
    }

    #[test]
    fn each_missing_field_is_named() {
        let cases: [(fn(&mut BiometricInput), &str); 5] = [
            (|i| i.height_in = None, "height_in"),
            (|i| i.weight_kg = None, "weight_kg"),
            (|i| i.age_years = None, "age_years"),
            (|i| i.gender = None, "gender"),
            (|i| i.activity_level = None, "activity_level"),
        ];

        for (clear, field) in cases {
            let mut input = complete();
            clear(&mut input);
            assert_eq!(
                Biometrics::try_from(&input).unwrap_err(),
                CoreError::MissingField(field)
            );
        }
    }

    #[test]
    fn non_finite_numbers_are_missing() {
        let mut input = complete();
        input.weight_kg = Some(f64::NAN);
        assert_eq!(
            Biometrics::try_from(&input).unwrap_err(),
            CoreError::MissingField("weight_kg")
        );
    }

    #[test]
    fn restrictions_default_to_empty() {
        let input: BiometricInput = serde_json::from_str(r#"{"height_in": 70}"#).unwrap();
        assert!(input.goals.is_empty());
        assert!(input.dietary_restrictions.is_empty());
    }
}
