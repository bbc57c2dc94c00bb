//! Clinical, patient and MRI report documents.
//!
//! Each report is rendered from the session's latest data. Every report
//! carries [`MEDICAL_DISCLAIMER`] verbatim.

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::Serialize;
use tracing::info;

use stepsight_core::disclaimer::MEDICAL_DISCLAIMER;
use stepsight_core::models::analysis::{AnalysisOutcome, Finding, ImageFeatures};
use stepsight_core::models::assessment::{AssessmentInput, AssessmentRecord, PatientInfo};
use stepsight_core::session::{Session, UserRole};
use stepsight_scoring::classification::{self, FollowUp};
use stepsight_scoring::notes::{self, FactorNote};

use crate::error::ExportError;
use crate::render::render_template;

const CLINICAL_TEMPLATE: &str = include_str!("../templates/clinical_report.txt.tera");
const PATIENT_TEMPLATE: &str = include_str!("../templates/patient_report.txt.tera");
const MRI_TEMPLATE: &str = include_str!("../templates/mri_report.txt.tera");

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Clinical,
    Patient,
    MriAnalysis,
}

impl ReportKind {
    /// The assessment report a user of `role` downloads.
    pub fn assessment_for(role: UserRole) -> Self {
        match role {
            UserRole::Doctor => ReportKind::Clinical,
            UserRole::Patient => ReportKind::Patient,
        }
    }

    fn file_stem(&self) -> &'static str {
        match self {
            ReportKind::Clinical => "StepSight_Clinical_Report",
            ReportKind::Patient => "StepSight_Patient_Report",
            ReportKind::MriAnalysis => "StepSight_MRI_Analysis",
        }
    }
}

#[derive(Serialize)]
struct PatientLines {
    name: String,
    patient_id: String,
    date_of_birth: String,
    contact_number: String,
}

impl PatientLines {
    fn new(patient: Option<&PatientInfo>) -> Self {
        let line = |value: Option<&String>| {
            value
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(NOT_AVAILABLE)
                .to_string()
        };
        Self {
            name: line(patient.and_then(|p| p.name.as_ref())),
            patient_id: line(patient.and_then(|p| p.patient_id.as_ref())),
            date_of_birth: line(patient.and_then(|p| p.date_of_birth.as_ref())),
            contact_number: line(patient.and_then(|p| p.contact_number.as_ref())),
        }
    }
}

/// Clinical inputs preformatted for display.
#[derive(Serialize)]
struct ClinicalLines {
    age: i32,
    gender: &'static str,
    bmi: String,
    sport: String,
    training: String,
    fatigue: i32,
    flexibility: i32,
    prior_injury: &'static str,
}

impl ClinicalLines {
    fn new(input: &AssessmentInput) -> Self {
        Self {
            age: input.age,
            gender: input.gender.as_str(),
            bmi: input.bmi.to_string(),
            sport: if input.sport.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                input.sport.clone()
            },
            training: input.training_hours_per_week.to_string(),
            fatigue: input.fatigue_level,
            flexibility: input.flexibility_score,
            prior_injury: if input.prior_injury { "Yes" } else { "No" },
        }
    }
}

#[derive(Serialize)]
struct ClinicalContext<'a> {
    disclaimer: &'static str,
    generated_at: String,
    assessor: &'a str,
    assessment_date: String,
    patient: PatientLines,
    clinical: ClinicalLines,
    score: u8,
    classification: &'static str,
    narrative: &'a str,
    factor_notes: Vec<FactorNote>,
    recommendations: &'a [String],
    follow_up: FollowUp,
}

#[derive(Serialize)]
struct PatientContext<'a> {
    disclaimer: &'static str,
    generated_date: String,
    score: u8,
    classification: &'static str,
    summary: &'static str,
    clinical: ClinicalLines,
    prior_injury: bool,
    recommendations: &'a [String],
    follow_up: FollowUp,
}

#[derive(Serialize)]
struct MriContext<'a> {
    disclaimer: &'static str,
    demo: bool,
    warning: &'a str,
    generated_at: String,
    analyst: &'a str,
    file_name: &'a str,
    upload_id: &'a str,
    analysis_timestamp: &'a str,
    risk_score: u32,
    severity_level: &'a str,
    status: Option<&'a str>,
    features: Option<&'a ImageFeatures>,
    structural: &'a [Finding],
    tears: &'a [Finding],
    surrounding: &'a [Finding],
    severity: &'a [Finding],
    treatment: &'a [String],
}

fn format_time(at: Timestamp) -> String {
    at.strftime("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn format_date(at: Timestamp) -> String {
    at.strftime("%Y-%m-%d").to_string()
}

/// Full clinical report for the doctor portal.
pub fn clinical_report(session: &Session, generated_at: Timestamp) -> Result<String, ExportError> {
    let record = session.assessment().ok_or(ExportError::NoAssessment)?;
    let assessor = session.user().map_or(NOT_AVAILABLE, |u| u.name.as_str());
    render_clinical(record, assessor, generated_at)
}

fn render_clinical(
    record: &AssessmentRecord,
    assessor: &str,
    generated_at: Timestamp,
) -> Result<String, ExportError> {
    let result = &record.result;
    let context = ClinicalContext {
        disclaimer: MEDICAL_DISCLAIMER,
        generated_at: format_time(generated_at),
        assessor,
        assessment_date: format_date(record.assessed_at),
        patient: PatientLines::new(record.patient.as_ref()),
        clinical: ClinicalLines::new(&record.input),
        score: result.score,
        classification: result.tier.label(),
        narrative: &result.narrative,
        factor_notes: notes::factor_notes(&record.input),
        recommendations: &result.recommendations,
        follow_up: classification::follow_up(result.tier),
    };
    render_template("clinical_report.txt", CLINICAL_TEMPLATE, &context)
}

/// Plain-language summary for the patient portal.
pub fn patient_report(session: &Session, generated_at: Timestamp) -> Result<String, ExportError> {
    let record = session.assessment().ok_or(ExportError::NoAssessment)?;
    let result = &record.result;
    let context = PatientContext {
        disclaimer: MEDICAL_DISCLAIMER,
        generated_date: format_date(generated_at),
        score: result.score,
        classification: result.tier.label(),
        summary: classification::guidance(result.tier).patient_summary,
        clinical: ClinicalLines::new(&record.input),
        prior_injury: record.input.prior_injury,
        recommendations: &result.recommendations,
        follow_up: classification::follow_up(result.tier),
    };
    render_template("patient_report.txt", PATIENT_TEMPLATE, &context)
}

/// Render the latest image analysis. Demo results are flagged in the
/// header along with the reason the service was bypassed.
pub fn mri_report(session: &Session, generated_at: Timestamp) -> Result<String, ExportError> {
    let outcome = session.analysis().ok_or(ExportError::NoAnalysis)?;
    let analyst = session.user().map_or("System", |u| u.name.as_str());
    let file_name = session.selected_file().unwrap_or("Unknown");
    render_mri(outcome, analyst, file_name, generated_at)
}

fn render_mri(
    outcome: &AnalysisOutcome,
    analyst: &str,
    file_name: &str,
    generated_at: Timestamp,
) -> Result<String, ExportError> {
    let result = &outcome.result;
    let findings = &result.findings;
    let context = MriContext {
        disclaimer: MEDICAL_DISCLAIMER,
        demo: outcome.is_fallback() || result.is_demo(),
        warning: outcome.warning().unwrap_or_default(),
        generated_at: format_time(generated_at),
        analyst,
        file_name,
        upload_id: &result.upload_id,
        analysis_timestamp: result.analysis_timestamp.as_deref().unwrap_or(NOT_AVAILABLE),
        risk_score: result.risk_score,
        severity_level: &result.severity_level,
        status: result.status.as_deref(),
        features: result.features.as_ref(),
        structural: &findings.structural,
        tears: &findings.tears,
        surrounding: &findings.surrounding,
        severity: &findings.severity,
        treatment: &findings.recommendations,
    };
    render_template("mri_report.txt", MRI_TEMPLATE, &context)
}

/// Render the report of the given kind from the session.
pub fn render_report(
    kind: ReportKind,
    session: &Session,
    generated_at: Timestamp,
) -> Result<String, ExportError> {
    match kind {
        ReportKind::Clinical => clinical_report(session, generated_at),
        ReportKind::Patient => patient_report(session, generated_at),
        ReportKind::MriAnalysis => mri_report(session, generated_at),
    }
}

/// Download-style file name, e.g. `StepSight_Clinical_Report_1735689600000.txt`.
pub fn report_file_name(kind: ReportKind, at: Timestamp) -> String {
    format!("{}_{}.txt", kind.file_stem(), at.as_millisecond())
}

/// Write a rendered report into `dir`, returning the file's path.
pub fn write_report(
    dir: &Path,
    kind: ReportKind,
    content: &str,
    at: Timestamp,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(kind, at));
    std::fs::write(&path, content.as_bytes())?;
    info!(path = %path.display(), "report written");
    Ok(path)
}
