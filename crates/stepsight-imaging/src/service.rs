use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use tracing::info;

use stepsight_core::models::analysis::AnalysisResult;

use crate::error::ImagingError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// File extensions the analysis service accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "dcm"];

/// The two-step upload/analyze contract of the analysis service.
///
/// Methods return boxed futures for dyn compatibility.
pub trait AnalysisService: Send + Sync {
    /// Upload an image and return the id the service issued for it.
    fn upload<'a>(
        &'a self,
        file_name: &'a str,
        bytes: Vec<u8>,
    ) -> BoxFuture<'a, Result<String, ImagingError>>;

    /// Request analysis of a previously uploaded image.
    fn analyze<'a>(
        &'a self,
        upload_id: &'a str,
    ) -> BoxFuture<'a, Result<AnalysisResult, ImagingError>>;
}

/// Lower-cased extension of `file_name`, if the service accepts it.
pub fn image_extension(file_name: &str) -> Result<String, ImagingError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| ImagingError::UnsupportedFileType(file_name.to_string()))?;

    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(ImagingError::UnsupportedFileType(file_name.to_string()))
    }
}

pub fn content_type(file_name: &str) -> &'static str {
    match image_extension(file_name).as_deref() {
        Ok("png") => "image/png",
        Ok("jpg") | Ok("jpeg") => "image/jpeg",
        Ok("dcm") => "application/dicom",
        _ => "application/octet-stream",
    }
}

/// Read an image from disk, returning its file name and contents.
pub async fn read_image(path: &Path) -> Result<(String, Vec<u8>), ImagingError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ImagingError::UnsupportedFileType(path.display().to_string()))?
        .to_string();
    image_extension(&file_name)?;

    let bytes = tokio::fs::read(path).await.map_err(|source| ImagingError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok((file_name, bytes))
}

/// Upload an image, then analyze it. The analysis call is only made once
/// the upload has returned an id.
pub async fn upload_and_analyze<S: AnalysisService + ?Sized>(
    service: &S,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<AnalysisResult, ImagingError> {
    image_extension(file_name)?;

    info!(file_name, size = bytes.len(), "uploading image");
    let upload_id = service.upload(file_name, bytes).await?;

    info!(upload_id = %upload_id, "requesting analysis");
    let result = service.analyze(&upload_id).await?;

    info!(
        upload_id = %result.upload_id,
        risk_score = result.risk_score,
        severity = %result.severity_level,
        "analysis complete"
    );
    Ok(result)
}
