use serde::{Deserialize, Serialize};

/// Upload id carried by the locally generated demo result.
pub const DEMO_UPLOAD_ID: &str = "DEMO-LOCAL";

fn default_finding_severity() -> String {
    "info".to_string()
}

/// A single finding line returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default = "default_finding_severity")]
    pub severity: String,
    pub text: String,
}

impl Finding {
    pub fn new(severity: &str, text: &str) -> Self {
        Self {
            severity: severity.to_string(),
            text: text.to_string(),
        }
    }
}

/// Structured findings grouped by section. Sections the service omits are
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    #[serde(default)]
    pub structural: Vec<Finding>,
    #[serde(default)]
    pub tears: Vec<Finding>,
    #[serde(default)]
    pub surrounding: Vec<Finding>,
    #[serde(default)]
    pub severity: Vec<Finding>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Image statistics the service reports alongside its rule-based score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFeatures {
    pub mean_intensity: f64,
    pub std_intensity: f64,
    pub edge_density: f64,
    pub texture_complexity: f64,
}

/// Analysis document returned by `GET /api/v1/mri/analyze/{upload_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Percentage, 0–100.
    pub risk_score: u32,
    pub severity_level: String,
    #[serde(default)]
    pub findings: Findings,
    #[serde(default)]
    pub upload_id: String,
    #[serde(default)]
    pub analysis_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<ImageFeatures>,
}

impl AnalysisResult {
    pub fn is_demo(&self) -> bool {
        self.upload_id == DEMO_UPLOAD_ID
    }
}

/// Where an [`AnalysisResult`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisSource {
    Service,
    /// The service failed; `warning` is the message shown to the user.
    Fallback { warning: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub source: AnalysisSource,
}

impl AnalysisOutcome {
    pub fn from_service(result: AnalysisResult) -> Self {
        Self {
            result,
            source: AnalysisSource::Service,
        }
    }

    pub fn fallback(result: AnalysisResult, warning: impl Into<String>) -> Self {
        Self {
            result,
            source: AnalysisSource::Fallback {
                warning: warning.into(),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, AnalysisSource::Fallback { .. })
    }

    pub fn warning(&self) -> Option<&str> {
        match &self.source {
            AnalysisSource::Service => None,
            AnalysisSource::Fallback { warning } => Some(warning),
        }
    }
}
