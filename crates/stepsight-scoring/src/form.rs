//! Raw form values and their conversion into an [`AssessmentInput`].

use serde::{Deserialize, Serialize};

use stepsight_core::models::assessment::{AssessmentInput, Gender};

use crate::validation::{
    AGE_RANGE, BMI_RANGE, FATIGUE_RANGE, FLEXIBILITY_RANGE, Field, TRAINING_RANGE,
    ValidationError, ValidationErrorKind, ValueRange, check_range,
};

/// Assessment fields exactly as submitted, before any parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentForm {
    pub age: String,
    pub gender: String,
    pub bmi: String,
    pub sport: String,
    pub training: String,
    pub fatigue: String,
    pub flexibility: String,
    /// `yes`/`no` (or `true`/`false`).
    pub prior_injury: String,
}

impl AssessmentForm {
    /// Parse and range-check every field, stopping at the first bad one.
    ///
    /// Age, BMI and training load are checked first, in that order.
    pub fn parse(&self) -> Result<AssessmentInput, ValidationError> {
        let age = parse_int(Field::Age, &self.age, AGE_RANGE)?;
        let bmi = parse_float(Field::Bmi, &self.bmi, BMI_RANGE)?;
        let training = parse_float(Field::Training, &self.training, TRAINING_RANGE)?;
        let gender = parse_gender(&self.gender)?;
        let fatigue = parse_int(Field::Fatigue, &self.fatigue, FATIGUE_RANGE)?;
        let flexibility = parse_int(Field::Flexibility, &self.flexibility, FLEXIBILITY_RANGE)?;
        let prior_injury = parse_yes_no(Field::PriorInjury, &self.prior_injury)?;

        Ok(AssessmentInput {
            age,
            gender,
            bmi,
            sport: self.sport.trim().to_string(),
            training_hours_per_week: training,
            fatigue_level: fatigue,
            flexibility_score: flexibility,
            prior_injury,
        })
    }
}

fn non_empty(field: Field, raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::new(field, ValidationErrorKind::Missing))
    } else {
        Ok(trimmed)
    }
}

fn not_a_number(field: Field, raw: &str) -> ValidationError {
    ValidationError::new(
        field,
        ValidationErrorKind::NotANumber {
            value: raw.to_string(),
        },
    )
}

fn parse_int(field: Field, raw: &str, range: ValueRange) -> Result<i32, ValidationError> {
    let trimmed = non_empty(field, raw)?;
    let value: i32 = trimmed.parse().map_err(|_| not_a_number(field, trimmed))?;
    check_range(field, f64::from(value), range)?;
    Ok(value)
}

fn parse_float(field: Field, raw: &str, range: ValueRange) -> Result<f64, ValidationError> {
    let trimmed = non_empty(field, raw)?;
    let value: f64 = trimmed
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| not_a_number(field, trimmed))?;
    check_range(field, value, range)?;
    Ok(value)
}

fn parse_gender(raw: &str) -> Result<Gender, ValidationError> {
    let trimmed = non_empty(Field::Gender, raw)?;
    trimmed.parse().map_err(|_| {
        ValidationError::new(
            Field::Gender,
            ValidationErrorKind::UnknownOption {
                value: trimmed.to_string(),
                expected: "male, female, other".to_string(),
            },
        )
    })
}

fn parse_yes_no(field: Field, raw: &str) -> Result<bool, ValidationError> {
    let trimmed = non_empty(field, raw)?;
    match trimmed.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        _ => Err(ValidationError::new(
            field,
            ValidationErrorKind::UnknownOption {
                value: trimmed.to_string(),
                expected: "yes, no".to_string(),
            },
        )),
    }
}
