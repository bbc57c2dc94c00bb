//! Per-login application state.
//!
//! A [`Session`] owns everything the intake flow remembers between steps:
//! who is logged in, the latest scored assessment, the selected image and
//! its analysis. Logging in starts from a clean session; logging out clears
//! all of it.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::analysis::AnalysisOutcome;
use crate::models::assessment::AssessmentRecord;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Doctor,
    Patient,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Doctor => "doctor",
            UserRole::Patient => "patient",
        }
    }

    /// Image upload and analysis is only offered on the doctor portal.
    pub fn can_analyze_images(&self) -> bool {
        matches!(self, UserRole::Doctor)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doctor" => Ok(UserRole::Doctor),
            "patient" => Ok(UserRole::Patient),
            _ => Err(CoreError::UnknownRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    /// Local part of the email, used as the display name.
    pub name: String,
    pub role: UserRole,
}

/// Check an email/password pair and build the user it identifies.
///
/// Any syntactically valid pair is accepted. This is a portal switch, not
/// authentication.
pub fn authenticate(email: &str, password: &str, role: UserRole) -> Result<User, CoreError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(CoreError::MissingCredentials);
    }
    if !EMAIL.is_match(email) {
        return Err(CoreError::InvalidEmail(email.to_string()));
    }

    let name = email.split('@').next().unwrap_or(email).to_string();
    Ok(User {
        email: email.to_string(),
        name,
        role,
    })
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    assessment: Option<AssessmentRecord>,
    selected_file: Option<String>,
    analysis: Option<AnalysisOutcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace this session with a fresh one for the given credentials.
    ///
    /// On failure the session is left untouched.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<&User, CoreError> {
        let user = authenticate(email, password, role)?;
        *self = Session::default();
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) {
        *self = Session::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn require_image_access(&self) -> Result<&User, CoreError> {
        match &self.user {
            Some(user) if user.role.can_analyze_images() => Ok(user),
            _ => Err(CoreError::Forbidden {
                action: "MRI analysis",
                required: "doctor",
            }),
        }
    }

    /// Store the latest scored assessment, replacing any previous one.
    pub fn record_assessment(&mut self, record: AssessmentRecord) -> &AssessmentRecord {
        self.assessment.insert(record)
    }

    pub fn assessment(&self) -> Option<&AssessmentRecord> {
        self.assessment.as_ref()
    }

    /// Select a new image. Any analysis of the previous selection is dropped.
    pub fn select_file(&mut self, file_name: impl Into<String>) {
        self.selected_file = Some(file_name.into());
        self.analysis = None;
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub fn record_analysis(&mut self, outcome: AnalysisOutcome) -> &AnalysisOutcome {
        self.analysis.insert(outcome)
    }

    pub fn analysis(&self) -> Option<&AnalysisOutcome> {
        self.analysis.as_ref()
    }
}
