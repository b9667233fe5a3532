use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ledger::entities::{DayBucket, EntrySource, Nutrition},
    profile::entities::Macros,
};

/// Data needed to record a food entry; id and timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewFoodEntry {
    pub name: String,
    pub nutrition: Nutrition,
    pub health_score: Option<f64>,
    pub confidence: Option<f64>,
    pub source: EntrySource,
}

impl NewFoodEntry {
    pub fn manual(name: impl Into<String>, nutrition: Nutrition) -> Self {
        Self {
            name: name.into(),
            nutrition,
            health_score: None,
            confidence: None,
            source: EntrySource::Manual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    OnTrack,
    Near,
    Under,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Progress {
    pub value: f64,
    pub goal: f64,
    /// `min(100, 100 * value / goal)`
    pub percent: f64,
    pub band: ProgressBand,
}

impl Progress {
    pub fn of(value: f64, goal: f64) -> Self {
        let percent = if goal > 0.0 {
            (100.0 * value / goal).min(100.0)
        } else {
            0.0
        };

        let band = if percent >= 100.0 {
            ProgressBand::OnTrack
        } else if percent >= 80.0 {
            ProgressBand::Near
        } else {
            ProgressBand::Under
        };

        Self {
            value,
            goal,
            percent,
            band,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MacroProgress {
    pub calories: Progress,
    pub protein_g: Progress,
    pub fat_g: Progress,
    pub carbs_g: Progress,
}

impl MacroProgress {
    pub fn new(totals: &Nutrition, calorie_goal: u32, macros: &Macros) -> Self {
        Self {
            calories: Progress::of(totals.calories, calorie_goal as f64),
            protein_g: Progress::of(totals.protein_g, macros.protein_g as f64),
            fat_g: Progress::of(totals.fat_g, macros.fat_g as f64),
            carbs_g: Progress::of(totals.carbs_g, macros.carbs_g as f64),
        }
    }
}

/// A day together with how far it is towards the user's targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DayProgress {
    pub day: DayBucket,
    /// Absent until the user has saved a profile.
    pub progress: Option<MacroProgress>,
}
