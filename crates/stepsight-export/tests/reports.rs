use jiff::Timestamp;

use stepsight_core::disclaimer::MEDICAL_DISCLAIMER;
use stepsight_core::models::analysis::{
    AnalysisOutcome, AnalysisResult, Finding, Findings, ImageFeatures,
};
use stepsight_core::models::assessment::{AssessmentInput, AssessmentRecord, Gender, PatientInfo};
use stepsight_core::session::{Session, UserRole};
use stepsight_export::error::ExportError;
use stepsight_export::reports::{
    ReportKind, clinical_report, mri_report, patient_report, render_report, report_file_name,
    write_report,
};

fn generated_at() -> Timestamp {
    "2025-06-01T09:30:00Z".parse().unwrap()
}

fn input() -> AssessmentInput {
    AssessmentInput {
        age: 20,
        gender: Gender::Female,
        bmi: 22.5,
        sport: "Soccer".to_string(),
        training_hours_per_week: 10.0,
        fatigue_level: 6,
        flexibility_score: 4,
        prior_injury: true,
    }
}

fn session_with_assessment(role: UserRole, patient: Option<PatientInfo>) -> Session {
    let mut session = Session::new();
    session.login("dr.smith@clinic.org", "pw", role).unwrap();
    let input = input();
    let result = stepsight_scoring::score(&input).unwrap();
    session.record_assessment(AssessmentRecord {
        input,
        patient,
        result,
        assessed_at: "2025-05-31T15:00:00Z".parse().unwrap(),
    });
    session
}

fn service_result() -> AnalysisResult {
    AnalysisResult {
        risk_score: 48,
        severity_level: "medium".to_string(),
        findings: Findings {
            structural: vec![Finding::new("low", "ACL fibers continuous.")],
            tears: vec![],
            surrounding: vec![Finding::new("moderate", "Small joint effusion.")],
            severity: vec![],
            recommendations: vec!["Physiotherapy assessment.".to_string()],
        },
        upload_id: "abc-123".to_string(),
        analysis_timestamp: Some("2025-06-01T09:29:00".to_string()),
        status: Some("completed".to_string()),
        features: None,
    }
}

#[test]
fn clinical_report_includes_every_field() {
    let patient = PatientInfo {
        name: Some("Alex Runner".to_string()),
        patient_id: Some("P-0042".to_string()),
        date_of_birth: None,
        contact_number: Some("555-0100".to_string()),
    };
    let session = session_with_assessment(UserRole::Doctor, Some(patient));
    let report = clinical_report(&session, generated_at()).unwrap();

    assert!(report.contains(MEDICAL_DISCLAIMER));
    assert!(report.contains("Generated: 2025-06-01 09:30:00 UTC"));
    assert!(report.contains("Assessed by: dr.smith"));
    assert!(report.contains("Assessment Date: 2025-05-31"));
    assert!(report.contains("Name: Alex Runner"));
    assert!(report.contains("Patient ID: P-0042"));
    assert!(report.contains("Date of Birth: N/A"));
    assert!(report.contains("Contact: 555-0100"));
    assert!(report.contains("Age: 20 years"));
    assert!(report.contains("Gender: female"));
    assert!(report.contains("BMI: 22.5 kg/m²"));
    assert!(report.contains("Primary Sport: Soccer"));
    assert!(report.contains("Training Volume: 10 hours/week"));
    assert!(report.contains("Fatigue Level: 6/10"));
    assert!(report.contains("Flexibility Score: 4/10"));
    assert!(report.contains("Previous ACL Injury: Yes"));
    assert!(report.contains("ACL Injury Risk Score: 100/100"));
    assert!(report.contains("Risk Classification: Higher Risk"));
    assert!(report.contains("• Age Factor: Peak risk age group"));
    assert!(report.contains("• Injury History: Previous ACL injury - highest risk factor"));
    assert!(report.contains("• Follow-up: Reassess in 6-8 weeks"));
    assert!(report.contains("Recommended Follow-up: 6-8 weeks"));
    assert!(report.contains("Specialist Referral: Recommended"));
}

#[test]
fn clinical_report_without_patient_info_uses_placeholders() {
    let session = session_with_assessment(UserRole::Doctor, None);
    let report = clinical_report(&session, generated_at()).unwrap();
    assert!(report.contains("Name: N/A"));
    assert!(report.contains("Patient ID: N/A"));
}

#[test]
fn patient_report_summarizes_in_plain_language() {
    let session = session_with_assessment(UserRole::Patient, None);
    let report = patient_report(&session, generated_at()).unwrap();

    assert!(report.contains(MEDICAL_DISCLAIMER));
    assert!(report.contains("Date: 2025-06-01"));
    assert!(report.contains("Your Risk Score: 100/100"));
    assert!(report.contains("Risk Level: Higher Risk"));
    assert!(report.contains("We strongly recommend consulting with a healthcare professional."));
    assert!(report.contains("✓ Sport: Soccer"));
    assert!(report.contains("✓ Training: 10 hours per week"));
    assert!(report.contains("⚠ Previous ACL injury noted"));
    assert!(report.contains("Schedule consultation with sports medicine specialist"));
    assert!(report.contains("reassess in 6-8 weeks"));
}

#[test]
fn assessment_reports_need_an_assessment() {
    let mut session = Session::new();
    session.login("a@b.co", "pw", UserRole::Doctor).unwrap();
    assert!(matches!(
        clinical_report(&session, generated_at()),
        Err(ExportError::NoAssessment)
    ));
    assert!(matches!(
        mri_report(&session, generated_at()),
        Err(ExportError::NoAnalysis)
    ));
}

#[test]
fn mri_report_lists_findings() {
    let mut session = Session::new();
    session.login("dr.smith@clinic.org", "pw", UserRole::Doctor).unwrap();
    session.select_file("knee.png");
    session.record_analysis(AnalysisOutcome::from_service(service_result()));

    let report = mri_report(&session, generated_at()).unwrap();
    assert!(report.contains(MEDICAL_DISCLAIMER));
    assert!(report.contains("Analyzed by: dr.smith"));
    assert!(report.contains("File: knee.png"));
    assert!(report.contains("Upload ID: abc-123"));
    assert!(report.contains("Risk Score: 48%"));
    assert!(report.contains("Severity Level: MEDIUM"));
    assert!(report.contains("• ACL fibers continuous. (low)"));
    assert!(report.contains("• Small joint effusion. (moderate)"));
    assert!(report.contains("• Physiotherapy assessment."));
    assert!(!report.contains("DEMO RESULT"));

    let tears = report.split("LIGAMENT TEAR ANALYSIS").nth(1).unwrap();
    let tears = tears.split("SURROUNDING TISSUES").next().unwrap();
    assert!(tears.contains('—'));
}

#[test]
fn fallback_analysis_is_flagged() {
    let mut result = service_result();
    result.upload_id = "DEMO-LOCAL".to_string();
    let mut session = Session::new();
    session.login("dr.smith@clinic.org", "pw", UserRole::Doctor).unwrap();
    session.record_analysis(AnalysisOutcome::fallback(result, "Upload failed (status 500)"));

    let report = render_report(ReportKind::MriAnalysis, &session, generated_at()).unwrap();
    assert!(report.contains("DEMO RESULT"));
    assert!(report.contains("Reason: Upload failed (status 500)"));
    assert!(report.contains("Upload ID: DEMO-LOCAL"));
    assert!(report.contains("File: Unknown"));
}

#[test]
fn rule_based_analysis_reports_status_and_image_features() {
    let body = r#"{
        "filepath": "uploads/abc.png",
        "is_dicom": false,
        "status": "completed",
        "features": {
            "mean_intensity": 101.5,
            "std_intensity": 40.25,
            "edge_density": 0.12,
            "texture_complexity": 180.5
        },
        "risk_score": 65,
        "severity_level": "high",
        "analysis_timestamp": "2025-01-01T10:00:05"
    }"#;
    let mut result: AnalysisResult = serde_json::from_str(body).unwrap();
    result.upload_id = "abc".to_string();

    let mut session = Session::new();
    session.login("dr.smith@clinic.org", "pw", UserRole::Doctor).unwrap();
    session.select_file("abc.png");
    session.record_analysis(AnalysisOutcome::from_service(result));

    let report = mri_report(&session, generated_at()).unwrap();
    assert!(report.contains("Risk Score: 65%"));
    assert!(report.contains("Status: completed"));
    assert!(report.contains("Analysis Time: 2025-01-01T10:00:05"));
    assert!(report.contains("IMAGE FEATURES"));
    assert!(report.contains("Mean Intensity: 101.5"));
    assert!(report.contains("Intensity Std Dev: 40.25"));
    assert!(report.contains("Edge Density: 0.12"));
    assert!(report.contains("Texture Complexity: 180.5"));
}

#[test]
fn analysis_without_features_omits_the_section() {
    let mut result = service_result();
    result.status = None;
    result.features = None;
    let mut session = Session::new();
    session.login("dr.smith@clinic.org", "pw", UserRole::Doctor).unwrap();
    session.record_analysis(AnalysisOutcome::from_service(result));

    let report = mri_report(&session, generated_at()).unwrap();
    assert!(!report.contains("IMAGE FEATURES"));
    assert!(!report.contains("Status:"));

    let mut with_features = service_result();
    with_features.features = Some(ImageFeatures {
        mean_intensity: 90.5,
        std_intensity: 12.5,
        edge_density: 0.25,
        texture_complexity: 75.5,
    });
    session.record_analysis(AnalysisOutcome::from_service(with_features));
    let report = mri_report(&session, generated_at()).unwrap();
    assert!(report.contains("Status: completed"));
    assert!(report.contains("Edge Density: 0.25"));
}

#[test]
fn report_kind_follows_role() {
    assert_eq!(ReportKind::assessment_for(UserRole::Doctor), ReportKind::Clinical);
    assert_eq!(ReportKind::assessment_for(UserRole::Patient), ReportKind::Patient);
}

#[test]
fn reports_are_written_with_download_names() {
    let dir = tempfile::tempdir().unwrap();
    let at = generated_at();
    assert_eq!(
        report_file_name(ReportKind::Clinical, at),
        format!("StepSight_Clinical_Report_{}.txt", at.as_millisecond())
    );

    let path = write_report(dir.path(), ReportKind::MriAnalysis, "body", at).unwrap();
    assert!(
        path.file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("StepSight_MRI_Analysis_")
    );
    assert_eq!(std::fs::read_to_string(path).unwrap(), "body");
}
