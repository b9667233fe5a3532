use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Very,
    Extreme,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.35,
            ActivityLevel::Moderate => 1.5,
            ActivityLevel::Very => 1.65,
            ActivityLevel::Extreme => 1.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    BuildMuscle,
    BurnFat,
    LoseWeight,
    Maintain,
    GainWeight,
}

impl Goal {
    pub fn is_loss(self) -> bool {
        matches!(self, Goal::LoseWeight | Goal::BurnFat)
    }

    pub fn is_gain(self) -> bool {
        matches!(self, Goal::BuildMuscle | Goal::GainWeight)
    }
}

/// Daily macronutrient targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Macros {
    pub protein_g: u32,
    pub fat_g: u32,
    pub carbs_g: u32,
}

/// Output of the goal calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionGoals {
    pub bmr: f64,
    pub tdee: f64,
    pub calories: u32,
    pub macros: Macros,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub user_id: String,
    pub height_in: f64,
    pub weight_kg: f64,
    pub age_years: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub goals: BTreeSet<Goal>,
    pub dietary_restrictions: BTreeSet<String>,
    pub calories: u32,
    pub macros: Macros,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
