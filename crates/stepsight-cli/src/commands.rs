//! Command handlers.
//!
//! Each handler works on an explicit [`Session`]: the binary signs in once
//! per invocation and passes the session through.

use std::fmt;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use jiff::Timestamp;
use tracing::info;

use stepsight_core::disclaimer::MEDICAL_DISCLAIMER;
use stepsight_core::models::analysis::{AnalysisOutcome, Finding};
use stepsight_core::models::assessment::{AssessmentRecord, PatientInfo};
use stepsight_core::session::{Session, UserRole};
use stepsight_export::reports::{self, ReportKind};
use stepsight_imaging::client::AnalysisClient;
use stepsight_imaging::fallback;
use stepsight_imaging::service::AnalysisService;
use stepsight_scoring::ScoreBreakdown;
use stepsight_scoring::form::AssessmentForm;

use crate::cli::{AnalyzeArgs, AssessArgs, Cli, Command, ConfigCommand};
use crate::config::{self, StepsightConfig};

pub async fn run(cli: Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };

    // Loaded per command: `config reset` must work on a file that no
    // longer parses.
    match &cli.command {
        Command::Assess(args) => {
            let config = config::load_config(&config_path)?;
            let mut session = sign_in(&cli)?;
            let record = assess(&mut session, args)?;
            println!("{}", AssessmentSummary(record));
            if args.breakdown {
                let breakdown = stepsight_scoring::score_breakdown(&record.input)?;
                println!("{}", BreakdownTable(&breakdown));
            }
            if let Some(dir) = report_dir(args.report_dir.as_deref(), &config) {
                let kind = ReportKind::assessment_for(cli.role);
                let path = export_report(&session, kind, dir)?;
                println!("Report written to {}", path.display());
            }
        }
        Command::Analyze(args) => {
            let config = config::load_config(&config_path)?;
            let mut session = sign_in(&cli)?;
            let client = AnalysisClient::new(config::effective_api_url(&config));
            let outcome = analyze(&mut session, &client, args).await?;
            println!("{}", AnalysisSummary(outcome));
            if let Some(dir) = report_dir(args.report_dir.as_deref(), &config) {
                let path = export_report(&session, ReportKind::MriAnalysis, dir)?;
                println!("Report written to {}", path.display());
            }
        }
        Command::Health => {
            let config = config::load_config(&config_path)?;
            let client = AnalysisClient::new(config::effective_api_url(&config));
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Command::Config { action } => run_config(action, &config_path)?,
    }

    Ok(())
}

fn sign_in(cli: &Cli) -> Result<Session> {
    let mut session = Session::new();
    let user = session.login(
        cli.email.as_deref().unwrap_or_default(),
        cli.password.as_deref().unwrap_or_default(),
        cli.role,
    )?;
    info!(user = %user.name, role = %user.role, "signed in");
    Ok(session)
}

fn report_dir<'a>(flag: Option<&'a Path>, config: &'a StepsightConfig) -> Option<&'a Path> {
    flag.or(config.report_dir.as_deref())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Patient details from the arguments. Only the doctor portal collects them.
pub fn patient_info(role: UserRole, args: &AssessArgs) -> Option<PatientInfo> {
    if role != UserRole::Doctor {
        return None;
    }
    let patient = PatientInfo {
        name: non_empty(&args.patient_name),
        patient_id: non_empty(&args.patient_id),
        date_of_birth: non_empty(&args.dob),
        contact_number: non_empty(&args.contact),
    };
    (!patient.is_empty()).then_some(patient)
}

/// Validate and score the submitted values, then store the assessment as
/// the session's latest.
pub fn assess<'a>(session: &'a mut Session, args: &AssessArgs) -> Result<&'a AssessmentRecord> {
    let role = session
        .role()
        .ok_or_else(|| eyre::eyre!("sign in before running an assessment"))?;

    let form = AssessmentForm {
        age: args.age.clone(),
        gender: args.gender.clone(),
        bmi: args.bmi.clone(),
        sport: args.sport.clone(),
        training: args.training.clone(),
        fatigue: args.fatigue.clone(),
        flexibility: args.flexibility.clone(),
        prior_injury: args.prior_injury.clone(),
    };
    let input = form.parse()?;
    let result = stepsight_scoring::score(&input)?;
    info!(score = result.score, tier = ?result.tier, "assessment scored");

    Ok(session.record_assessment(AssessmentRecord {
        patient: patient_info(role, args),
        input,
        result,
        assessed_at: Timestamp::now(),
    }))
}

/// Analyze the image at `args.file`, substituting the demo result when the
/// service fails. Only doctor accounts may run this.
pub async fn analyze<'a, S: AnalysisService + ?Sized>(
    session: &'a mut Session,
    service: &S,
    args: &AnalyzeArgs,
) -> Result<&'a AnalysisOutcome> {
    session.require_image_access()?;

    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    session.select_file(file_name);

    let outcome = fallback::analyze_file_with_fallback(service, &args.file).await;
    Ok(session.record_analysis(outcome))
}

pub fn export_report(session: &Session, kind: ReportKind, dir: &Path) -> Result<PathBuf> {
    let now = Timestamp::now();
    let content = reports::render_report(kind, session, now)?;
    let path = reports::write_report(dir, kind, &content, now)
        .wrap_err_with(|| format!("failed to write report into {}", dir.display()))?;
    Ok(path)
}

/// Terminal summary of a scored assessment.
pub struct AssessmentSummary<'a>(pub &'a AssessmentRecord);

impl fmt::Display for AssessmentSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.0.result;
        writeln!(f, "ACL Injury Risk Score: {}/100", result.score)?;
        writeln!(f, "{}", result.tier.label())?;
        writeln!(f)?;
        writeln!(f, "{}", result.narrative)?;
        writeln!(f)?;
        writeln!(f, "Recommendations:")?;
        for rec in &result.recommendations {
            writeln!(f, "  • {rec}")?;
        }
        writeln!(f)?;
        write!(f, "{MEDICAL_DISCLAIMER}")
    }
}

/// Every additive term of a score, then the multiplier and the result.
pub struct BreakdownTable<'a>(pub &'a ScoreBreakdown);

impl fmt::Display for BreakdownTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        let rows = [
            ("Base", b.base),
            ("Age", b.age),
            ("Gender", b.gender),
            ("BMI", b.bmi),
            ("Training", b.training),
            ("Fatigue", b.fatigue),
            ("Flexibility", b.flexibility),
            ("Prior injury", b.prior_injury),
        ];
        writeln!(f, "Score breakdown:")?;
        for (label, value) in rows {
            writeln!(f, "  {label:<14}{value:+.2}")?;
        }
        let sport = b.sport_key.as_deref().unwrap_or("none");
        writeln!(f, "  {:<14}{:.2}", "Subtotal", b.subtotal())?;
        writeln!(f, "  {:<14}x{:.2} ({sport})", "Sport", b.sport_multiplier)?;
        write!(f, "  {:<14}{:.2} → {}", "Raw", b.raw, b.score)
    }
}

/// Terminal summary of an image analysis, flagged when it is the demo
/// substitute.
pub struct AnalysisSummary<'a>(pub &'a AnalysisOutcome);

impl AnalysisSummary<'_> {
    fn section(f: &mut fmt::Formatter<'_>, title: &str, findings: &[Finding]) -> fmt::Result {
        writeln!(f, "{title}:")?;
        if findings.is_empty() {
            writeln!(f, "  —")?;
        }
        for finding in findings {
            writeln!(f, "  • {} ({})", finding.text, finding.severity)?;
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.0.result;
        if let Some(warning) = self.0.warning() {
            writeln!(
                f,
                "⚠️ Analysis service unavailable ({warning}). Showing DEMO result, not for clinical use."
            )?;
            writeln!(f)?;
        }
        writeln!(f, "Risk Score: {}%", result.risk_score)?;
        writeln!(f, "Severity: {}", result.severity_level.to_uppercase())?;
        if let Some(status) = &result.status {
            writeln!(f, "Status: {status}")?;
        }
        writeln!(f, "Upload ID: {}", result.upload_id)?;
        if let Some(at) = &result.analysis_timestamp {
            writeln!(f, "Analyzed at: {at}")?;
        }
        writeln!(f)?;

        if let Some(features) = &result.features {
            writeln!(f, "Image features:")?;
            writeln!(f, "  Mean intensity:     {}", features.mean_intensity)?;
            writeln!(f, "  Intensity std dev:  {}", features.std_intensity)?;
            writeln!(f, "  Edge density:       {}", features.edge_density)?;
            writeln!(f, "  Texture complexity: {}", features.texture_complexity)?;
            writeln!(f)?;
        }

        let findings = &result.findings;
        Self::section(f, "Structural findings", &findings.structural)?;
        Self::section(f, "Ligament tears", &findings.tears)?;
        Self::section(f, "Surrounding tissues", &findings.surrounding)?;
        Self::section(f, "Severity assessment", &findings.severity)?;

        writeln!(f, "Recommended treatment:")?;
        if findings.recommendations.is_empty() {
            writeln!(f, "  —")?;
        }
        for rec in &findings.recommendations {
            writeln!(f, "  • {rec}")?;
        }
        writeln!(f)?;
        write!(f, "{MEDICAL_DISCLAIMER}")
    }
}

fn run_config(action: &ConfigCommand, path: &Path) -> Result<()> {
    match action {
        ConfigCommand::Show => {
            let config = config::load_config(path)?;
            println!("Config file: {}", path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            println!("Effective API URL: {}", config::effective_api_url(&config));
        }
        ConfigCommand::SetApiUrl { url } => {
            let mut config = config::load_config(path)?;
            config.api_base_url = config::normalize_api_url(url)?;
            config::save_config(path, &config)?;
            println!("API URL set to {}", config.api_base_url);
        }
        ConfigCommand::SetReportDir { dir } => {
            let mut config = config::load_config(path)?;
            config.report_dir = Some(dir.clone());
            config::save_config(path, &config)?;
            println!("Report directory set to {}", dir.display());
        }
        ConfigCommand::Reset => {
            if config::delete_config(path)? {
                println!("Config reset");
            } else {
                println!("No config file at {}", path.display());
            }
        }
    }
    Ok(())
}
