use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upload rejected; carries the server's message when it sent one.
    #[error("{0}")]
    Upload(String),

    /// Analysis rejected; carries the server's message when it sent one.
    #[error("{0}")]
    Analyze(String),

    #[error("{0}")]
    Health(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("unsupported file type: {0} (expected png, jpg, jpeg or dcm)")]
    UnsupportedFileType(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
