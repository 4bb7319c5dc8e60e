use crate::domain::model::{ExportFormat, ExportRequest, HealthStatus, ResumeData};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where downloaded exports are written.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// The remote service that parses documents and renders exports.
#[async_trait]
pub trait ResumeBackend: Send + Sync {
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<ResumeData>;
    async fn export(&self, format: ExportFormat, request: &ExportRequest) -> Result<Vec<u8>>;
    async fn update_data(&self, data: &ResumeData) -> Result<ResumeData>;
    async fn health(&self) -> Result<HealthStatus>;
}
