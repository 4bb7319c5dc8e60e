use crate::core::templates::{render_preview, TemplateId};
use crate::core::wizard::WizardState;
use crate::domain::model::{ExportFormat, HealthStatus, ResumeData, ResumeField};
use crate::domain::ports::{ResumeBackend, Storage};
use crate::utils::error::{Result, WizardError};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub preview_width: usize,
    /// Post saved edits to the backend's update endpoint.
    pub sync_edits: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            preview_width: 72,
            sync_edits: false,
        }
    }
}

/// Drives a `WizardState` against a backend and a download store.
///
/// Failures are written to the state's error banner and also returned, so
/// callers can either render the banner or bail out.
pub struct WizardSession<B: ResumeBackend, S: Storage> {
    backend: B,
    storage: S,
    state: WizardState,
    options: SessionOptions,
}

impl<B: ResumeBackend, S: Storage> WizardSession<B, S> {
    pub fn new(backend: B, storage: S) -> Self {
        Self::with_options(backend, storage, WizardState::new(), SessionOptions::default())
    }

    pub fn with_options(backend: B, storage: S, state: WizardState, options: SessionOptions) -> Self {
        Self {
            backend,
            storage,
            state,
            options,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Step 1: validate, read and post the document.
    pub async fn upload(&mut self, path: &Path) -> Result<&ResumeData> {
        let file_name = self.state.select_file(path)?.name.clone();
        tracing::info!("Processing {}", file_name);

        let outcome = match tokio::fs::read(path).await {
            Ok(content) => self.backend.upload(&file_name, content).await,
            Err(e) => Err(WizardError::IoError(e)),
        };

        match outcome {
            Ok(data) => {
                tracing::info!(
                    "Extracted resume for '{}' ({} skills, {} roles)",
                    data.name,
                    data.skills.len(),
                    data.experience.len()
                );
                self.state.finish_upload(Ok(data))?;
                self.state.parsed().ok_or(WizardError::NoResumeData)
            }
            Err(e) => {
                tracing::warn!("Upload failed: {}", e);
                self.state.finish_upload(Err(e.user_friendly_message()))?;
                Err(e)
            }
        }
    }

    pub fn choose_template(&mut self, template: TemplateId) -> Result<()> {
        self.state.choose_template(template)?;
        tracing::debug!("Template set to {}", template);
        Ok(())
    }

    pub fn start_editing(&mut self) -> Result<&ResumeData> {
        self.state.start_editing()
    }

    pub fn edit_field(&mut self, field: ResumeField, value: &str) -> Result<()> {
        self.state.edit_field(field, value)
    }

    pub fn add_skill(&mut self, skill: &str) -> Result<bool> {
        self.state.add_skill(skill)
    }

    pub fn remove_skill(&mut self, index: usize) -> Result<String> {
        self.state.remove_skill(index)
    }

    pub fn cancel_edits(&mut self) {
        self.state.cancel_edits();
    }

    /// Merges the edited copy locally, then optionally round-trips it through
    /// the backend. A failed sync keeps the local merge.
    pub async fn save_edits(&mut self) -> Result<&ResumeData> {
        let merged = self.state.save_edits()?.clone();

        if self.options.sync_edits {
            match self.backend.update_data(&merged).await {
                Ok(echoed) => self.state.replace_data(echoed)?,
                Err(e) => {
                    tracing::warn!("Could not sync edits: {}", e);
                    self.state.record_error(e.user_friendly_message());
                    return Err(e);
                }
            }
        }

        self.state.parsed().ok_or(WizardError::NoResumeData)
    }

    /// Step 2 -> 3. Returns the preview in the selected template.
    pub fn generate(&mut self) -> Result<String> {
        self.state.generate()?;
        self.preview()
    }

    pub fn preview(&self) -> Result<String> {
        let data = self.state.parsed().ok_or(WizardError::NoResumeData)?;
        Ok(render_preview(
            self.state.selected_template(),
            data,
            self.options.preview_width,
        ))
    }

    /// Step 3: export through the backend and save the blob. Returns the saved path.
    pub async fn download(&mut self, format: ExportFormat) -> Result<String> {
        let request = self.state.export_request()?;

        let bytes = match self.backend.export(format, &request).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Export failed: {}", e);
                self.state.record_error(e.user_friendly_message());
                return Err(e);
            }
        };

        let file_name = format.download_file_name(chrono::Utc::now().timestamp_millis());
        let saved = match self.storage.write_file(&file_name, &bytes).await {
            Ok(saved) => saved,
            Err(e) => {
                self.state.record_error(e.user_friendly_message());
                return Err(e);
            }
        };

        self.state.clear_error();
        tracing::info!("Saved {} ({} bytes) to {}", format, bytes.len(), saved);
        Ok(saved)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.backend.health().await
    }

    /// "Create another resume".
    pub fn reset(&mut self) {
        self.state.reset();
    }
}
