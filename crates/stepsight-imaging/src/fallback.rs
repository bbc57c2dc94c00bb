//! Demo substitution for a failed analysis.
//!
//! When the service cannot be reached or rejects a request, the caller
//! still gets a populated result. It is marked with
//! [`DEMO_UPLOAD_ID`](stepsight_core::models::analysis::DEMO_UPLOAD_ID) and is
//! not a clinical finding.

use std::path::Path;

use tracing::warn;

use stepsight_core::models::analysis::{
    AnalysisOutcome, AnalysisResult, DEMO_UPLOAD_ID, Finding, Findings,
};

use crate::error::ImagingError;
use crate::service::{AnalysisService, read_image, upload_and_analyze};

pub const DEMO_RISK_SCORE: u32 = 62;
pub const DEMO_SEVERITY: &str = "moderate";

/// Fixed demo payload, stamped with the current time.
pub fn demo_result() -> AnalysisResult {
    AnalysisResult {
        risk_score: DEMO_RISK_SCORE,
        severity_level: DEMO_SEVERITY.to_string(),
        findings: Findings {
            structural: vec![
                Finding::new(
                    "moderate",
                    "Mild thickening of ACL fibers with intermediate signal intensity.",
                ),
                Finding::new("low", "No frank discontinuity noted."),
            ],
            tears: vec![Finding::new(
                "low",
                "No complete ACL tear; low suspicion for partial sprain.",
            )],
            surrounding: vec![Finding::new(
                "low",
                "Menisci intact. No significant joint effusion.",
            )],
            severity: vec![Finding::new(
                "moderate",
                "Overall moderate concern for ACL strain without full-thickness tear.",
            )],
            recommendations: vec![
                "Relative rest and activity modification for 2-3 weeks.".to_string(),
                "Supervised physiotherapy emphasizing hamstring/quadriceps balance.".to_string(),
                "Neuromuscular training and progressive plyometrics as tolerated.".to_string(),
                "Follow-up MRI if symptoms persist > 6-8 weeks or deteriorate.".to_string(),
            ],
        },
        upload_id: DEMO_UPLOAD_ID.to_string(),
        analysis_timestamp: Some(jiff::Timestamp::now().to_string()),
        status: None,
        features: None,
    }
}

fn substitute(err: ImagingError) -> AnalysisOutcome {
    warn!(error = %err, "image analysis failed, using demo result");
    AnalysisOutcome::fallback(demo_result(), err.to_string())
}

/// Upload and analyze `bytes`; on any failure return the demo result with
/// the error message as its warning.
pub async fn analyze_with_fallback<S: AnalysisService + ?Sized>(
    service: &S,
    file_name: &str,
    bytes: Vec<u8>,
) -> AnalysisOutcome {
    match upload_and_analyze(service, file_name, bytes).await {
        Ok(result) => AnalysisOutcome::from_service(result),
        Err(err) => substitute(err),
    }
}

/// Like [`analyze_with_fallback`], reading the image from `path` first.
pub async fn analyze_file_with_fallback<S: AnalysisService + ?Sized>(
    service: &S,
    path: &Path,
) -> AnalysisOutcome {
    match read_image(path).await {
        Ok((file_name, bytes)) => analyze_with_fallback(service, &file_name, bytes).await,
        Err(err) => substitute(err),
    }
}
