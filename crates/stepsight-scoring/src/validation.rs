use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stepsight_core::models::assessment::AssessmentInput;

/// Inclusive range a numeric field must fall within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const AGE_RANGE: ValueRange = ValueRange::new(10.0, 100.0);
pub const BMI_RANGE: ValueRange = ValueRange::new(10.0, 60.0);
pub const TRAINING_RANGE: ValueRange = ValueRange::new(0.0, 50.0);
pub const FATIGUE_RANGE: ValueRange = ValueRange::new(0.0, 10.0);
pub const FLEXIBILITY_RANGE: ValueRange = ValueRange::new(0.0, 10.0);

/// Assessment form fields, named as they appear in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    Gender,
    Bmi,
    Training,
    Fatigue,
    Flexibility,
    PriorInjury,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Bmi => "bmi",
            Field::Training => "training",
            Field::Fatigue => "fatigue",
            Field::Flexibility => "flexibility",
            Field::PriorInjury => "prior_injury",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    #[error("a value is required")]
    Missing,

    #[error("'{value}' is not a number")]
    NotANumber { value: String },

    #[error("{value} is outside range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("'{value}' is not one of {expected}")]
    UnknownOption { value: String, expected: String },
}

/// A rejected clinical input, naming the field at fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{field}: {kind}")]
pub struct ValidationError {
    pub field: Field,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(field: Field, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }
}

/// Range-check a single value.
pub fn check_range(field: Field, value: f64, range: ValueRange) -> Result<(), ValidationError> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            ValidationErrorKind::OutOfRange {
                value,
                min: range.min,
                max: range.max,
            },
        ))
    }
}

/// Check every numeric field of an assessment, in form order.
pub fn validate(input: &AssessmentInput) -> Result<(), ValidationError> {
    check_range(Field::Age, f64::from(input.age), AGE_RANGE)?;
    check_range(Field::Bmi, input.bmi, BMI_RANGE)?;
    check_range(Field::Training, input.training_hours_per_week, TRAINING_RANGE)?;
    check_range(Field::Fatigue, f64::from(input.fatigue_level), FATIGUE_RANGE)?;
    check_range(
        Field::Flexibility,
        f64::from(input.flexibility_score),
        FLEXIBILITY_RANGE,
    )?;
    Ok(())
}
