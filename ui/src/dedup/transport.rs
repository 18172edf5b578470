//! HTTP boundary to the deduplication service.

use reqwest::multipart::{Form, Part};

use crate::core::config::ServiceConfig;

use super::error::UploadError;
use super::session::{SelectedFile, ServiceResponse};

const PDF_MIME: &str = "application/pdf";
const FILES_FIELD: &str = "files";

/// Sends selected files upstream and returns the raw status and body.
///
/// Implementations only report transport faults; interpreting the status and
/// body is the session's job.
#[allow(async_fn_in_trait)]
pub trait UploadTransport {
    async fn upload(&self, files: &[SelectedFile]) -> Result<ServiceResponse, UploadError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpTransport {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(ServiceConfig::from_env())
    }
}

impl UploadTransport for HttpTransport {
    async fn upload(&self, files: &[SelectedFile]) -> Result<ServiceResponse, UploadError> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(PDF_MIME)
                .map_err(transport_fault)?;
            form = form.part(FILES_FIELD, part);
        }

        tracing::debug!(
            endpoint = self.config.endpoint(),
            files = files.len(),
            "posting upload"
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(transport_fault)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_fault)?;

        Ok(ServiceResponse { status, body })
    }
}

fn transport_fault(err: reqwest::Error) -> UploadError {
    UploadError::Transport(err.to_string())
}
