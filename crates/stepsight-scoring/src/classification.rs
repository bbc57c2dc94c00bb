//! Score thresholds and the guidance copy bound to each tier.

use serde::Serialize;

use stepsight_core::models::risk::RiskTier;

/// Scores below this are Low.
pub const LOW_THRESHOLD: u8 = 30;
/// Scores below this (and at least [`LOW_THRESHOLD`]) are Moderate.
pub const MODERATE_THRESHOLD: u8 = 60;

pub fn classify(score: u8) -> RiskTier {
    match score {
        s if s < LOW_THRESHOLD => RiskTier::Low,
        s if s < MODERATE_THRESHOLD => RiskTier::Moderate,
        _ => RiskTier::High,
    }
}

/// Fixed copy shown for a tier.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TierGuidance {
    pub narrative: &'static str,
    /// Plain-language summary for the patient report.
    pub patient_summary: &'static str,
    pub recommendations: &'static [&'static str],
}

static LOW: TierGuidance = TierGuidance {
    narrative: "This assessment indicates a relatively low ACL injury risk based on the provided \
                factors. Continue with current preventive measures and regular training.",
    patient_summary: "Your assessment shows a relatively low risk for ACL injury. Continue your \
                      current training and prevention routine.",
    recommendations: &[
        "Strength Training: Continue lower-body strength 3x/week (quads, hamstrings, glutes)",
        "Flexibility: Maintain stretching with hip/ankle mobility",
        "Monitoring: Track fatigue during intense blocks",
        "Follow-up: Reassess in 6-12 months or after major training changes",
        "Prevention: Consider neuromuscular training programs",
    ],
};

static MODERATE: TierGuidance = TierGuidance {
    narrative: "This assessment indicates moderate ACL injury risk. Consider implementing enhanced \
                preventive measures and monitoring closely during high-intensity activities.",
    patient_summary: "Your assessment shows moderate risk. Consider working with a trainer or \
                      therapist to improve specific risk factors.",
    recommendations: &[
        "Flexibility: Increase to 4-5 sessions/week",
        "Proprioception: Add balance work (single-leg stands, wobble board) 3x/week",
        "Load: Reduce peak intensity by about 15-20% then progress",
        "Recovery: At least 1-2 rest days/week",
        "Technique: Review landing/cutting mechanics with coach or PT",
        "Follow-up: Reassess in 3-6 months",
    ],
};

static HIGH: TierGuidance = TierGuidance {
    narrative: "This assessment indicates elevated ACL injury risk. A comprehensive injury \
                prevention program is strongly recommended, along with consultation with a \
                sports medicine specialist.",
    patient_summary: "Your assessment shows elevated risk. We strongly recommend consulting with \
                      a healthcare professional.",
    recommendations: &[
        "Consultation: See a sports medicine physician or orthopedist",
        "Program: Implement evidence-based ACL prevention (FIFA 11+, PEP)",
        "Mobility: Daily stretching; consider working with a PT",
        "Advanced Proprioception: Supervised plyometrics/balance training",
        "Load: Reduce training volume 20-30% until risk factors improve",
        "Biomechanics: Consider video analysis of jumps/landings",
        "Follow-up: Reassess in 6-8 weeks",
    ],
};

pub fn guidance(tier: RiskTier) -> &'static TierGuidance {
    match tier {
        RiskTier::Low => &LOW,
        RiskTier::Moderate => &MODERATE,
        RiskTier::High => &HIGH,
    }
}

/// When to reassess, and whether to refer out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowUp {
    pub interval: &'static str,
    pub specialist_referral: bool,
}

pub fn follow_up(tier: RiskTier) -> FollowUp {
    match tier {
        RiskTier::Low => FollowUp {
            interval: "6-12 months",
            specialist_referral: false,
        },
        RiskTier::Moderate => FollowUp {
            interval: "3-6 months",
            specialist_referral: false,
        },
        RiskTier::High => FollowUp {
            interval: "6-8 weeks",
            specialist_referral: true,
        },
    }
}
