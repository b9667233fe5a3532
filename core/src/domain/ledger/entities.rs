use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{common::generate_timestamp, ledger::value_objects::NewFoodEntry};

/// Energy and macronutrient amounts. Every field is non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
}

impl Nutrition {
    pub const ZERO: Nutrition = Nutrition {
        calories: 0.0,
        protein_g: 0.0,
        fat_g: 0.0,
        carbs_g: 0.0,
    };

    pub fn new(calories: f64, protein_g: f64, fat_g: f64, carbs_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            fat_g,
            carbs_g,
        }
        .sanitized()
    }

    /// Replaces negative or non-finite amounts with zero.
    pub fn sanitized(self) -> Self {
        fn clean(value: f64) -> f64 {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                0.0
            }
        }

        Self {
            calories: clean(self.calories),
            protein_g: clean(self.protein_g),
            fat_g: clean(self.fat_g),
            carbs_g: clean(self.carbs_g),
        }
    }
}

impl Add for Nutrition {
    type Output = Nutrition;

    fn add(self, rhs: Self) -> Self::Output {
        Nutrition {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            fat_g: self.fat_g + rhs.fat_g,
            carbs_g: self.carbs_g + rhs.carbs_g,
        }
    }
}

impl AddAssign for Nutrition {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::ZERO, |acc, n| acc + n)
    }
}

impl<'a> Sum<&'a Nutrition> for Nutrition {
    fn sum<I: Iterator<Item = &'a Nutrition>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    Vision,
    Barcode,
    Manual,
}

/// A single logged food. Entries are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub nutrition: Nutrition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub source: EntrySource,
}

impl FoodEntry {
    pub fn new(input: NewFoodEntry) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            timestamp: now,
            name: input.name,
            nutrition: input.nutrition.sanitized(),
            health_score: clamp_optional(input.health_score, 1.0, 10.0),
            confidence: clamp_optional(input.confidence, 0.0, 1.0),
            source: input.source,
        }
    }
}

fn clamp_optional(value: Option<f64>, min: f64, max: f64) -> Option<f64> {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(min, max))
}

/// All entries logged on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DayBucket {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub entries: Vec<FoodEntry>,
    pub totals: Nutrition,
}

impl DayBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            entries: Vec::new(),
            totals: Nutrition::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: FoodEntry) {
        self.entries.push(entry);
        self.recompute_totals();
    }

    pub fn remove(&mut self, entry_id: Uuid) -> Option<FoodEntry> {
        let position = self.entries.iter().position(|e| e.id == entry_id)?;
        let removed = self.entries.remove(position);
        self.recompute_totals();
        Some(removed)
    }

    /// Totals are always re-derived from the entries, so they cannot drift.
    pub fn recompute_totals(&mut self) {
        self.totals = self.entries.iter().map(|e| &e.nutrition).sum();
    }
}

/// Monday-to-Sunday view over seven day buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeekBucket {
    #[schema(value_type = String, format = Date)]
    pub week_start: NaiveDate,
    #[schema(value_type = Vec<DayBucket>)]
    pub days: [DayBucket; 7],
    pub weekly_totals: Nutrition,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(calories: f64, protein_g: f64, fat_g: f64, carbs_g: f64) -> FoodEntry {
        FoodEntry::new(NewFoodEntry::manual(
            "oats",
            Nutrition::new(calories, protein_g, fat_g, carbs_g),
        ))
    }

    #[test]
    fn sanitized_drops_negative_and_non_finite_amounts() {
        let n = Nutrition {
            calories: -5.0,
            protein_g: f64::NAN,
            fat_g: f64::INFINITY,
            carbs_g: 12.5,
        }
        .sanitized();

        assert_eq!(n, Nutrition::new(0.0, 0.0, 0.0, 12.5));
    }

    #[test]
    fn totals_follow_pushes_and_removals() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut bucket = DayBucket::empty(date);
        let first = entry(300.0, 20.0, 10.0, 30.0);
        let second = entry(150.5, 5.25, 2.0, 18.0);
        let first_id = first.id;

        bucket.push(first);
        bucket.push(second);
        assert_eq!(bucket.totals, Nutrition::new(450.5, 25.25, 12.0, 48.0));

        assert!(bucket.remove(first_id).is_some());
        assert_eq!(bucket.totals, Nutrition::new(150.5, 5.25, 2.0, 18.0));
        assert!(bucket.remove(first_id).is_none());
    }

    #[test]
    fn scores_are_clamped_into_range() {
        let mut input = NewFoodEntry::manual("cake", Nutrition::ZERO);
        input.health_score = Some(14.0);
        input.confidence = Some(-0.2);

        let entry = FoodEntry::new(input);
        assert_eq!(entry.health_score, Some(10.0));
        assert_eq!(entry.confidence, Some(0.0));
    }

    #[test]
    fn entry_ids_are_unique() {
        let a = entry(1.0, 0.0, 0.0, 0.0);
        let b = entry(1.0, 0.0, 0.0, 0.0);
        assert_ne!(a.id, b.id);
    }
}
