//! stepsight-scoring
//!
//! Deterministic ACL injury risk scoring. Pure computation with no I/O:
//! validated clinical inputs in, a bounded score and tier guidance out.

pub mod classification;
pub mod factors;
pub mod form;
pub mod notes;
pub mod sport;
pub mod validation;

use serde::Serialize;

use stepsight_core::models::assessment::AssessmentInput;
use stepsight_core::models::risk::RiskResult;

use validation::ValidationError;

/// Every contribution that went into a score, in order of application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub age: f64,
    pub gender: f64,
    pub bmi: f64,
    pub training: f64,
    pub fatigue: f64,
    pub flexibility: f64,
    pub prior_injury: f64,
    /// Catalog key matched in the sport string, if any.
    pub sport_key: Option<String>,
    pub sport_multiplier: f64,
    /// Total after the multiplier, before rounding and clamping.
    pub raw: f64,
    pub score: u8,
}

impl ScoreBreakdown {
    /// Sum of the additive terms, before the sport multiplier.
    pub fn subtotal(&self) -> f64 {
        self.base
            + self.age
            + self.gender
            + self.bmi
            + self.training
            + self.fatigue
            + self.flexibility
            + self.prior_injury
    }
}

/// Score an assessment and show the working.
///
/// Fails on the first out-of-range field before anything is computed.
pub fn score_breakdown(input: &AssessmentInput) -> Result<ScoreBreakdown, ValidationError> {
    validation::validate(input)?;

    let sport = sport::match_sport(&input.sport);
    let mut breakdown = ScoreBreakdown {
        base: factors::BASE_SCORE,
        age: factors::age_adjustment(input.age),
        gender: factors::gender_adjustment(input.gender),
        bmi: factors::bmi_adjustment(input.bmi),
        training: factors::training_adjustment(input.training_hours_per_week),
        fatigue: factors::fatigue_adjustment(input.fatigue_level),
        flexibility: factors::flexibility_adjustment(input.flexibility_score),
        prior_injury: factors::prior_injury_adjustment(input.prior_injury),
        sport_key: sport.map(|(key, _)| key.to_string()),
        sport_multiplier: sport.map_or(sport::DEFAULT_MULTIPLIER, |(_, m)| m),
        raw: 0.0,
        score: 0,
    };
    breakdown.raw = breakdown.subtotal() * breakdown.sport_multiplier;
    breakdown.score = clamp_score(breakdown.raw);
    Ok(breakdown)
}

/// Score an assessment and attach the guidance for its tier.
pub fn score(input: &AssessmentInput) -> Result<RiskResult, ValidationError> {
    let breakdown = score_breakdown(input)?;
    let tier = classification::classify(breakdown.score);
    let guidance = classification::guidance(tier);

    Ok(RiskResult {
        score: breakdown.score,
        tier,
        narrative: guidance.narrative.to_string(),
        recommendations: guidance
            .recommendations
            .iter()
            .map(|r| r.to_string())
            .collect(),
    })
}

/// Round to the nearest integer, then clamp into 0–100.
pub fn clamp_score(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}
