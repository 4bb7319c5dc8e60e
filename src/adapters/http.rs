use crate::domain::model::{ExportFormat, ExportRequest, HealthStatus, ResumeData, UploadResponse};
use crate::domain::ports::ResumeBackend;
use crate::utils::error::{Result, WizardError, UPLOAD_FALLBACK_MESSAGE};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// `ResumeBackend` over the backend's JSON/multipart HTTP API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    fn connection_error(&self, source: reqwest::Error) -> WizardError {
        WizardError::Connection {
            base_url: self.base_url.clone(),
            source,
        }
    }

    /// Reads a `{success, data, error}` envelope whatever the HTTP status is.
    async fn read_envelope(&self, response: reqwest::Response) -> Result<ResumeData> {
        let status = response.status();
        let envelope: UploadResponse = response
            .json()
            .await
            .map_err(|e| self.connection_error(e))?;
        tracing::debug!(%status, success = envelope.success, "Backend envelope received");

        match envelope {
            UploadResponse {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            UploadResponse { error, .. } => Err(WizardError::UploadRejected {
                message: error.unwrap_or_else(|| UPLOAD_FALLBACK_MESSAGE.to_string()),
            }),
        }
    }
}

#[async_trait::async_trait]
impl ResumeBackend for HttpBackend {
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<ResumeData> {
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        tracing::debug!(
            "Uploading {} ({} bytes, {}) to {}",
            file_name,
            content.len(),
            mime,
            self.url("upload")
        );

        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(mime.essence_str())?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        self.read_envelope(response).await
    }

    async fn export(&self, format: ExportFormat, request: &ExportRequest) -> Result<Vec<u8>> {
        let endpoint = self.url(format.endpoint());
        tracing::debug!(template = %request.template, "Requesting {} from {}", format, endpoint);

        let response = self
            .client
            .post(&endpoint)
            .json(request)
            .send()
            .await
            .map_err(WizardError::Download)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} export failed with HTTP {}", format, status);
            return Err(WizardError::ExportFailed {
                format,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(WizardError::Download)?;
        tracing::debug!("Received {} bytes of {}", bytes.len(), format);
        Ok(bytes.to_vec())
    }

    async fn update_data(&self, data: &ResumeData) -> Result<ResumeData> {
        let response = self
            .client
            .post(self.url("update-data"))
            .json(data)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        self.read_envelope(response).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .client
            .get(self.url("health"))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let health = response
            .error_for_status()
            .map_err(|e| self.connection_error(e))?
            .json::<HealthStatus>()
            .await
            .map_err(|e| self.connection_error(e))?;
        Ok(health)
    }
}
