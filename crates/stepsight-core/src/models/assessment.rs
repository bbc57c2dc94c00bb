use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::risk::RiskResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(CoreError::UnknownGender(s.to_string())),
        }
    }
}

/// Athlete risk factors for a single submission.
///
/// Built once from validated form values; the scoring engine re-checks the
/// ranges before computing anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    /// Years, valid 10–100.
    pub age: i32,
    pub gender: Gender,
    /// kg/m², valid 10–60.
    pub bmi: f64,
    /// Free-text primary sport, matched case-insensitively.
    pub sport: String,
    /// Valid 0–50.
    pub training_hours_per_week: f64,
    /// Self-reported, 0–10.
    pub fatigue_level: i32,
    /// Self-reported, 0–10. Baseline is 5.
    pub flexibility_score: i32,
    pub prior_injury: bool,
}

/// Identifying details a clinician may attach to an assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: Option<String>,
    pub patient_id: Option<String>,
    pub date_of_birth: Option<String>,
    pub contact_number: Option<String>,
}

impl PatientInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.patient_id.is_none()
            && self.date_of_birth.is_none()
            && self.contact_number.is_none()
    }
}

/// A scored submission as held by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub input: AssessmentInput,
    pub patient: Option<PatientInfo>,
    pub result: RiskResult,
    pub assessed_at: jiff::Timestamp,
}
