use stepsight_core::error::CoreError;
use stepsight_core::models::analysis::{AnalysisOutcome, AnalysisResult, Findings};
use stepsight_core::models::assessment::{AssessmentInput, AssessmentRecord, Gender};
use stepsight_core::models::risk::{RiskResult, RiskTier};
use stepsight_core::session::{Session, UserRole, authenticate};

fn record() -> AssessmentRecord {
    AssessmentRecord {
        input: AssessmentInput {
            age: 20,
            gender: Gender::Female,
            bmi: 22.0,
            sport: "soccer".to_string(),
            training_hours_per_week: 10.0,
            fatigue_level: 6,
            flexibility_score: 4,
            prior_injury: false,
        },
        patient: None,
        result: RiskResult {
            score: 91,
            tier: RiskTier::High,
            narrative: "elevated".to_string(),
            recommendations: vec![],
        },
        assessed_at: jiff::Timestamp::UNIX_EPOCH,
    }
}

fn analysis() -> AnalysisOutcome {
    AnalysisOutcome::from_service(AnalysisResult {
        risk_score: 40,
        severity_level: "medium".to_string(),
        findings: Findings::default(),
        upload_id: "abc".to_string(),
        analysis_timestamp: None,
        status: None,
        features: None,
    })
}

#[test]
fn name_is_email_local_part() {
    let user = authenticate("  jane.doe@clinic.org ", "secret", UserRole::Doctor).unwrap();
    assert_eq!(user.email, "jane.doe@clinic.org");
    assert_eq!(user.name, "jane.doe");
    assert_eq!(user.role, UserRole::Doctor);
}

#[test]
fn missing_password_is_rejected() {
    let err = authenticate("a@b.co", "", UserRole::Patient).unwrap_err();
    assert!(matches!(err, CoreError::MissingCredentials));
}

#[test]
fn malformed_email_is_rejected() {
    for email in ["plainaddress", "a@b", "a b@c.de", "@c.de"] {
        let err = authenticate(email, "pw", UserRole::Patient).unwrap_err();
        assert!(matches!(err, CoreError::InvalidEmail(_)), "{email}");
    }
}

#[test]
fn login_starts_from_clean_state() {
    let mut session = Session::new();
    session.login("doc@clinic.org", "pw", UserRole::Doctor).unwrap();
    session.record_assessment(record());
    session.select_file("knee.png");
    session.record_analysis(analysis());

    session.login("other@clinic.org", "pw", UserRole::Patient).unwrap();
    assert_eq!(session.user().unwrap().name, "other");
    assert!(session.assessment().is_none());
    assert!(session.selected_file().is_none());
    assert!(session.analysis().is_none());
}

#[test]
fn failed_login_keeps_existing_session() {
    let mut session = Session::new();
    session.login("doc@clinic.org", "pw", UserRole::Doctor).unwrap();
    session.record_assessment(record());

    assert!(session.login("not-an-email", "pw", UserRole::Doctor).is_err());
    assert_eq!(session.user().unwrap().name, "doc");
    assert!(session.assessment().is_some());
}

#[test]
fn logout_clears_everything() {
    let mut session = Session::new();
    session.login("doc@clinic.org", "pw", UserRole::Doctor).unwrap();
    session.record_assessment(record());
    session.record_analysis(analysis());

    session.logout();
    assert!(!session.is_authenticated());
    assert!(session.assessment().is_none());
    assert!(session.analysis().is_none());
}

#[test]
fn selecting_a_new_file_drops_previous_analysis() {
    let mut session = Session::new();
    session.login("doc@clinic.org", "pw", UserRole::Doctor).unwrap();
    session.select_file("first.png");
    session.record_analysis(analysis());

    session.select_file("second.dcm");
    assert_eq!(session.selected_file(), Some("second.dcm"));
    assert!(session.analysis().is_none());
}

#[test]
fn patients_cannot_analyze_images() {
    let mut session = Session::new();
    assert!(session.require_image_access().is_err());

    session.login("pat@home.net", "pw", UserRole::Patient).unwrap();
    let err = session.require_image_access().unwrap_err();
    assert_eq!(err.to_string(), "MRI analysis requires a doctor account");

    session.login("doc@clinic.org", "pw", UserRole::Doctor).unwrap();
    assert!(session.require_image_access().is_ok());
}

#[test]
fn role_and_gender_parse_case_insensitively() {
    assert_eq!("Doctor".parse::<UserRole>().unwrap(), UserRole::Doctor);
    assert_eq!(" FEMALE ".parse::<Gender>().unwrap(), Gender::Female);
    assert!("nurse".parse::<UserRole>().is_err());
    assert!("unknown".parse::<Gender>().is_err());
}
