//! Mifflin-St Jeor based calorie and macro targets.

use crate::domain::{
    common::entities::app_errors::CoreError,
    profile::{
        entities::{Gender, Macros, NutritionGoals},
        value_objects::{BiometricInput, Biometrics},
    },
};

const CM_PER_INCH: f64 = 2.54;

const CALORIE_FLOOR: f64 = 1200.0;
const CALORIE_CEILING: f64 = 4000.0;
const DEFICIT_KCAL: f64 = 400.0;
const SURPLUS_KCAL: f64 = 300.0;

const PROTEIN_RANGE: (f64, f64) = (50.0, 300.0);
const FAT_RANGE: (f64, f64) = (30.0, 150.0);
const CARBS_RANGE: (f64, f64) = (50.0, 500.0);

pub fn compute_goals(input: &BiometricInput) -> Result<NutritionGoals, CoreError> {
    let biometrics = Biometrics::try_from(input)?;
    Ok(goals_for(&biometrics))
}

pub fn goals_for(b: &Biometrics) -> NutritionGoals {
    let bmr = basal_metabolic_rate(b);
    let tdee = bmr * b.activity_level.multiplier();

    let loss = b.has_loss_goal();
    let gain = b.has_gain_goal();

    let target = if loss {
        (tdee - DEFICIT_KCAL).max(bmr * 1.10)
    } else if gain {
        (tdee + SURPLUS_KCAL).min(tdee * 1.15)
    } else {
        tdee
    };
    let calories = target.clamp(CALORIE_FLOOR, CALORIE_CEILING).round();

    // gain wins over loss here, unlike the calorie target
    let protein_per_kg = if gain {
        2.0
    } else if loss {
        1.8
    } else {
        1.6
    };
    let protein_g = (b.weight_kg * protein_per_kg)
        .round()
        .clamp(PROTEIN_RANGE.0, PROTEIN_RANGE.1);

    let fat_share = if loss { 0.25 } else { 0.30 };
    let fat_g = (calories * fat_share / 9.0)
        .round()
        .clamp(FAT_RANGE.0, FAT_RANGE.1);

    let carbs_g = ((calories - protein_g * 4.0 - fat_g * 9.0) / 4.0)
        .round()
        .clamp(CARBS_RANGE.0, CARBS_RANGE.1);

    NutritionGoals {
        bmr,
        tdee,
        calories: calories as u32,
        macros: Macros {
            protein_g: protein_g as u32,
            fat_g: fat_g as u32,
            carbs_g: carbs_g as u32,
        },
    }
}

fn basal_metabolic_rate(b: &Biometrics) -> f64 {
    let height_cm = b.height_in * CM_PER_INCH;
    let base = 10.0 * b.weight_kg + 6.25 * height_cm - 5.0 * f64::from(b.age_years);

    match b.gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}
