//! Error taxonomy for uploads and exports.

use thiserror::Error;

/// Why an upload attempt ended in the `Failed` phase.
///
/// Every variant is terminal for the current attempt only; the session stays
/// usable and a new submit is always accepted afterwards. `Display` is the
/// English log line; the upload panel renders localized text instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select at least one PDF file")]
    NoFiles,
    /// Carries the offending file name.
    #[error("{0} is not a PDF")]
    NotPdf(String),
    /// Connection refused, DNS failure, aborted body read and similar.
    #[error("Could not reach the deduplication service: {0}")]
    Transport(String),
    /// Non-success status. `detail` is the service's own message when it sent one.
    #[error("{}", service_message(.status, .detail))]
    Service { status: u16, detail: Option<String> },
    /// A success status whose body does not describe a usable result.
    #[error("The service returned an unusable result: {0}")]
    Malformed(String),
}

fn service_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Upload failed (HTTP {status})"),
    }
}

impl UploadError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Unable to determine export directory")]
    NoExportDirectory,
    #[error("Unable to write export: {0}")]
    Io(String),
    #[error("Browser download failed: {0}")]
    Browser(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
