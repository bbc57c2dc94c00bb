//! Command-line surface.
//!
//! ```bash
//! # Score an athlete and write the clinical report
//! stepsight --email dr@clinic.org --password pw assess --age 20 --gender female \
//!     --bmi 22 --sport soccer --training 10 --fatigue 6 --flexibility 4 \
//!     --prior-injury no --report-dir ./reports
//!
//! # Analyze a knee image (doctor accounts only)
//! stepsight --email dr@clinic.org --password pw analyze knee.png
//!
//! # Point at another analysis service
//! stepsight config set-api-url http://10.0.0.5:5001
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use stepsight_core::session::UserRole;

#[derive(Debug, Parser)]
#[command(
    name = "stepsight",
    version,
    about = "ACL injury risk screening",
    long_about = "Score ACL injury risk from clinical inputs, analyze knee MRI images \
                  through the analysis service, and export plain-text reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Account email
    #[arg(long, global = true, env = "STEPSIGHT_EMAIL")]
    pub email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "STEPSIGHT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Portal to sign in to (doctor or patient)
    #[arg(long, global = true, default_value = "doctor")]
    pub role: UserRole,

    /// Config file override
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score ACL injury risk from clinical inputs
    Assess(AssessArgs),

    /// Upload a knee image and analyze it
    Analyze(AnalyzeArgs),

    /// Show the analysis service's health report
    Health,

    /// Inspect or change the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// Inputs are taken as text and validated by the scoring engine, so a bad
/// value is reported with its field name and allowed range.
#[derive(Debug, Clone, Default, Args)]
pub struct AssessArgs {
    /// Age in years (10-100)
    #[arg(long)]
    pub age: String,

    /// male, female or other
    #[arg(long)]
    pub gender: String,

    /// Body mass index (10-60)
    #[arg(long)]
    pub bmi: String,

    /// Primary sport
    #[arg(long, default_value = "")]
    pub sport: String,

    /// Training hours per week (0-50)
    #[arg(long)]
    pub training: String,

    /// Fatigue level (0-10)
    #[arg(long)]
    pub fatigue: String,

    /// Flexibility score (0-10)
    #[arg(long)]
    pub flexibility: String,

    /// Previous ACL injury (yes or no)
    #[arg(long)]
    pub prior_injury: String,

    /// Patient name (doctor portal)
    #[arg(long)]
    pub patient_name: Option<String>,

    /// Patient ID (doctor portal)
    #[arg(long)]
    pub patient_id: Option<String>,

    /// Patient date of birth (doctor portal)
    #[arg(long)]
    pub dob: Option<String>,

    /// Patient contact number (doctor portal)
    #[arg(long)]
    pub contact: Option<String>,

    /// Print the per-factor score breakdown
    #[arg(long)]
    pub breakdown: bool,

    /// Write the report for this role into DIR
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// PNG, JPEG or DICOM image
    pub file: PathBuf,

    /// Write the MRI analysis report into DIR
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file and the effective service URL
    Show,

    /// Store the analysis service URL
    SetApiUrl {
        url: String,
    },

    /// Store the default report directory
    SetReportDir {
        dir: PathBuf,
    },

    /// Delete the config file
    Reset,
}
