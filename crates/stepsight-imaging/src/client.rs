//! HTTP implementation of [`AnalysisService`].
//!
//! Plain JSON over HTTP. No retries and no timeouts: a failed step is
//! reported to the caller, which decides whether to fall back.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stepsight_core::models::analysis::AnalysisResult;

use crate::error::ImagingError;
use crate::service::{AnalysisService, BoxFuture, content_type};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

const HEALTH_PATH: &str = "/api/health";
const UPLOAD_PATH: &str = "/api/v1/mri/upload";
const ANALYZE_PATH: &str = "/api/v1/mri/analyze";

/// Multipart field the service reads the image from.
const FILE_FIELD: &str = "file";

/// Capabilities reported by `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub tensorflow_available: bool,
    #[serde(default)]
    pub dicom_available: bool,
    #[serde(default)]
    pub mrnet_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for one analysis service deployment.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn health(&self) -> Result<ServiceHealth, ImagingError> {
        let resp = self.http.get(self.url(HEALTH_PATH)).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ImagingError::Health(server_message(&body).unwrap_or_else(
                || format!("Health check failed (status {})", status.as_u16()),
            )));
        }
        serde_json::from_str(&body).map_err(|e| ImagingError::ResponseParse(e.to_string()))
    }

    async fn send_upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ImagingError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type(file_name))?;
        let form = Form::new().part(FILE_FIELD, part);

        let resp = self
            .http
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), "upload response received");

        if !status.is_success() {
            return Err(ImagingError::Upload(server_message(&body).unwrap_or_else(
                || format!("Upload failed (status {})", status.as_u16()),
            )));
        }

        serde_json::from_str::<UploadResponse>(&body)
            .ok()
            .and_then(|r| r.upload_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ImagingError::Upload("Upload failed: missing upload_id".to_string()))
    }

    async fn fetch_analysis(&self, upload_id: &str) -> Result<AnalysisResult, ImagingError> {
        let resp = self
            .http
            .get(format!("{}/{upload_id}", self.url(ANALYZE_PATH)))
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), upload_id, "analysis response received");

        if !status.is_success() {
            return Err(ImagingError::Analyze(server_message(&body).unwrap_or_else(
                || format!("Analysis failed (status {})", status.as_u16()),
            )));
        }

        let mut result: AnalysisResult = serde_json::from_str(&body)
            .map_err(|e| ImagingError::ResponseParse(e.to_string()))?;

        // The rule-based service does not echo the id back.
        if result.upload_id.is_empty() {
            result.upload_id = upload_id.to_string();
        }
        Ok(result)
    }
}

impl AnalysisService for AnalysisClient {
    fn upload<'a>(
        &'a self,
        file_name: &'a str,
        bytes: Vec<u8>,
    ) -> BoxFuture<'a, Result<String, ImagingError>> {
        Box::pin(self.send_upload(file_name, bytes))
    }

    fn analyze<'a>(
        &'a self,
        upload_id: &'a str,
    ) -> BoxFuture<'a, Result<AnalysisResult, ImagingError>> {
        Box::pin(self.fetch_analysis(upload_id))
    }
}

/// The `error` field of a JSON error body, if there is one.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
}
