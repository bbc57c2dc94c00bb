//! Qualitative notes per risk factor, for the clinical report.
//!
//! These bands are descriptive and intentionally coarser than the scoring
//! weights in [`crate::factors`].

use serde::Serialize;

use stepsight_core::models::assessment::{AssessmentInput, Gender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactorNote {
    pub factor: &'static str,
    pub note: &'static str,
}

pub fn factor_notes(input: &AssessmentInput) -> Vec<FactorNote> {
    vec![
        FactorNote {
            factor: "Age Factor",
            note: age_note(input.age),
        },
        FactorNote {
            factor: "Gender Factor",
            note: match input.gender {
                Gender::Female => {
                    "Elevated risk (female athletes have 2-8x higher ACL injury rates)"
                }
                Gender::Male | Gender::Other => "Standard risk",
            },
        },
        FactorNote {
            factor: "BMI Status",
            note: bmi_note(input.bmi),
        },
        FactorNote {
            factor: "Training Load",
            note: if input.training_hours_per_week > 15.0 {
                "High volume - monitor for overtraining"
            } else {
                "Moderate volume"
            },
        },
        FactorNote {
            factor: "Fatigue Level",
            note: match input.fatigue_level {
                f if f > 7 => "High - significant risk factor",
                f if f > 4 => "Moderate",
                _ => "Low",
            },
        },
        FactorNote {
            factor: "Flexibility",
            note: match input.flexibility_score {
                f if f < 5 => "Poor - increased risk",
                f if f > 7 => "Good",
                _ => "Fair",
            },
        },
        FactorNote {
            factor: "Injury History",
            note: if input.prior_injury {
                "Previous ACL injury - highest risk factor"
            } else {
                "No previous injury"
            },
        },
    ]
}

fn age_note(age: i32) -> &'static str {
    if (15..=25).contains(&age) {
        "Peak risk age group"
    } else if age > 35 {
        "Lower risk age"
    } else {
        "Moderate risk age"
    }
}

fn bmi_note(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight - increased risk"
    } else if bmi > 30.0 {
        "Obese - increased risk"
    } else {
        "Normal range"
    }
}
