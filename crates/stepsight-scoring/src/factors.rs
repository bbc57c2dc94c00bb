//! Weights for each risk factor.
//!
//! Each function returns the amount added to the running score; negative
//! values lower it.

use stepsight_core::models::assessment::Gender;

pub const BASE_SCORE: f64 = 20.0;

/// Peak-risk age band, inclusive on both ends.
pub const AGE_PEAK_MIN: i32 = 15;
pub const AGE_PEAK_MAX: i32 = 25;
pub const AGE_PEAK_WEIGHT: f64 = 15.0;

/// Moderate band, exclusive of its lower bound.
pub const AGE_MODERATE_FLOOR: i32 = 26;
pub const AGE_MODERATE_MAX: i32 = 35;
pub const AGE_MODERATE_WEIGHT: f64 = 8.0;

pub const AGE_LOW_THRESHOLD: i32 = 35;
pub const AGE_LOW_WEIGHT: f64 = -5.0;

pub const AGE_YOUNG_WEIGHT: f64 = 5.0;

pub const GENDER_FEMALE_WEIGHT: f64 = 8.0;

pub const BMI_UNDERWEIGHT_THRESHOLD: f64 = 18.5;
pub const BMI_UNDERWEIGHT_WEIGHT: f64 = 5.0;
pub const BMI_OBESE_THRESHOLD: f64 = 30.0;
pub const BMI_OBESE_WEIGHT: f64 = 10.0;

pub const TRAINING_WEIGHT: f64 = 2.5;
pub const TRAINING_MAX: f64 = 25.0;

pub const FATIGUE_WEIGHT: f64 = 2.0;

pub const FLEXIBILITY_BASELINE: i32 = 5;
pub const FLEXIBILITY_WEIGHT: f64 = 1.5;

pub const PRIOR_INJURY_WEIGHT: f64 = 20.0;

/// First matching band wins.
///
/// Age 26 matches neither the peak band nor the moderate band (which starts
/// above 26) and falls through to the young-athlete weight.
pub fn age_adjustment(age: i32) -> f64 {
    if (AGE_PEAK_MIN..=AGE_PEAK_MAX).contains(&age) {
        AGE_PEAK_WEIGHT
    } else if age > AGE_MODERATE_FLOOR && age <= AGE_MODERATE_MAX {
        AGE_MODERATE_WEIGHT
    } else if age > AGE_LOW_THRESHOLD {
        AGE_LOW_WEIGHT
    } else {
        AGE_YOUNG_WEIGHT
    }
}

pub fn gender_adjustment(gender: Gender) -> f64 {
    match gender {
        Gender::Female => GENDER_FEMALE_WEIGHT,
        Gender::Male | Gender::Other => 0.0,
    }
}

pub fn bmi_adjustment(bmi: f64) -> f64 {
    if bmi < BMI_UNDERWEIGHT_THRESHOLD {
        BMI_UNDERWEIGHT_WEIGHT
    } else if bmi > BMI_OBESE_THRESHOLD {
        BMI_OBESE_WEIGHT
    } else {
        0.0
    }
}

pub fn training_adjustment(hours_per_week: f64) -> f64 {
    (hours_per_week * TRAINING_WEIGHT).min(TRAINING_MAX)
}

pub fn fatigue_adjustment(fatigue_level: i32) -> f64 {
    f64::from(fatigue_level) * FATIGUE_WEIGHT
}

/// Below-baseline flexibility raises the score, above-baseline lowers it.
pub fn flexibility_adjustment(flexibility_score: i32) -> f64 {
    -(f64::from(flexibility_score - FLEXIBILITY_BASELINE) * FLEXIBILITY_WEIGHT)
}

pub fn prior_injury_adjustment(prior_injury: bool) -> f64 {
    if prior_injury { PRIOR_INJURY_WEIGHT } else { 0.0 }
}
