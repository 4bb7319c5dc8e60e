use crate::core::templates::TemplateId;
use crate::domain::model::{ExportRequest, ResumeData, ResumeField};
use crate::utils::error::{Result, WizardError};
use crate::utils::validation::validate_resume_file;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    #[default]
    Upload = 1,
    ChooseTemplate = 2,
    Generate = 3,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Upload,
        WizardStep::ChooseTemplate,
        WizardStep::Generate,
    ];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Upload => "Upload",
            WizardStep::ChooseTemplate => "Choose Template",
            WizardStep::Generate => "Generate",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
}

/// Local UI state of the three-step wizard.
///
/// Every operation either applies fully or returns an error and leaves the
/// state as it was. The only exception is `select_file`, which records the
/// rejection message in the error banner.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    step: WizardStep,
    file: Option<SelectedFile>,
    parsed: Option<ResumeData>,
    selected_template: TemplateId,
    processing: bool,
    error: Option<String>,
    edited: Option<ResumeData>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: TemplateId) -> Self {
        Self {
            selected_template: template,
            ..Self::default()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn parsed(&self) -> Option<&ResumeData> {
        self.parsed.as_ref()
    }

    pub fn selected_template(&self) -> TemplateId {
        self.selected_template
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.edited.is_some()
    }

    pub fn edited(&self) -> Option<&ResumeData> {
        self.edited.as_ref()
    }

    pub fn select_file(&mut self, path: &Path) -> Result<&SelectedFile> {
        self.expect_step(WizardStep::Upload, "select a file")?;
        if self.processing {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "select a file while processing",
            });
        }

        if let Err(e) = validate_resume_file(path) {
            self.error = Some(e.user_friendly_message());
            return Err(e);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.error = None;
        self.processing = true;
        Ok(self.file.insert(SelectedFile {
            path: path.to_path_buf(),
            name,
        }))
    }

    /// Completes an upload started by `select_file`. On failure the message
    /// goes to the banner and the wizard stays on the upload step.
    pub fn finish_upload(&mut self, outcome: std::result::Result<ResumeData, String>) -> Result<()> {
        if !self.processing {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "finish an upload that was not started",
            });
        }
        self.processing = false;

        match outcome {
            Ok(data) => {
                self.parsed = Some(data);
                self.step = WizardStep::ChooseTemplate;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        Ok(())
    }

    pub fn choose_template(&mut self, template: TemplateId) -> Result<()> {
        self.expect_step(WizardStep::ChooseTemplate, "choose a template")?;
        self.selected_template = template;
        Ok(())
    }

    pub fn start_editing(&mut self) -> Result<&ResumeData> {
        if self.step == WizardStep::Upload {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "edit the resume",
            });
        }
        let parsed = self.parsed.as_ref().ok_or(WizardError::NoResumeData)?;
        Ok(self.edited.get_or_insert_with(|| parsed.clone()))
    }

    pub fn edit_field(&mut self, field: ResumeField, value: impl Into<String>) -> Result<()> {
        self.editing_copy()?.set_field(field, value);
        Ok(())
    }

    /// Appends a skill; blank and already-present skills are ignored.
    pub fn add_skill(&mut self, skill: &str) -> Result<bool> {
        let edited = self.editing_copy()?;
        let skill = skill.trim();
        if skill.is_empty() || edited.skills.iter().any(|s| s == skill) {
            return Ok(false);
        }
        edited.skills.push(skill.to_string());
        Ok(true)
    }

    pub fn remove_skill(&mut self, index: usize) -> Result<String> {
        let edited = self.editing_copy()?;
        let len = edited.skills.len();
        if index >= len {
            return Err(WizardError::SkillIndexOutOfRange { index, len });
        }
        Ok(edited.skills.remove(index))
    }

    pub fn save_edits(&mut self) -> Result<&ResumeData> {
        let edited = self.edited.take().ok_or(WizardError::NotEditing)?;
        Ok(self.parsed.insert(edited))
    }

    pub fn cancel_edits(&mut self) {
        self.edited = None;
    }

    /// Replaces the parsed record, e.g. with the backend's echo after an update.
    pub fn replace_data(&mut self, data: ResumeData) -> Result<()> {
        if self.parsed.is_none() {
            return Err(WizardError::NoResumeData);
        }
        self.parsed = Some(data);
        Ok(())
    }

    pub fn generate(&mut self) -> Result<()> {
        self.expect_step(WizardStep::ChooseTemplate, "generate the resume")?;
        if self.parsed.is_none() {
            return Err(WizardError::NoResumeData);
        }
        if self.edited.is_some() {
            self.save_edits()?;
        }
        self.step = WizardStep::Generate;
        Ok(())
    }

    pub fn export_request(&self) -> Result<ExportRequest> {
        self.expect_step(WizardStep::Generate, "export the resume")?;
        let data = self.parsed.as_ref().ok_or(WizardError::NoResumeData)?;
        Ok(ExportRequest {
            resume_data: data.clone(),
            template: self.selected_template.id().to_string(),
        })
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Back to an empty upload step. The template choice survives.
    pub fn reset(&mut self) {
        self.step = WizardStep::Upload;
        self.file = None;
        self.parsed = None;
        self.processing = false;
        self.error = None;
        self.edited = None;
    }

    fn editing_copy(&mut self) -> Result<&mut ResumeData> {
        self.edited.as_mut().ok_or(WizardError::NotEditing)
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed() -> ResumeData {
        ResumeData {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            skills: vec!["Rust".to_string(), "Go".to_string()],
            ..Default::default()
        }
    }

    fn at_choose_template() -> WizardState {
        let mut state = WizardState::new();
        state.select_file(Path::new("cv.docx")).unwrap();
        state.finish_upload(Ok(parsed())).unwrap();
        state
    }

    #[test]
    fn test_happy_path_walks_three_steps() {
        let mut state = WizardState::new();
        assert_eq!(state.step(), WizardStep::Upload);
        assert_eq!(state.selected_template(), TemplateId::Modern);

        let file = state.select_file(Path::new("/home/jane/cv.docx")).unwrap();
        assert_eq!(file.name, "cv.docx");
        assert!(state.is_processing());

        state.finish_upload(Ok(parsed())).unwrap();
        assert!(!state.is_processing());
        assert_eq!(state.step(), WizardStep::ChooseTemplate);

        state.choose_template(TemplateId::Professional).unwrap();
        state.generate().unwrap();
        assert_eq!(state.step(), WizardStep::Generate);

        let request = state.export_request().unwrap();
        assert_eq!(request.template, "professional");
        assert_eq!(request.resume_data.name, "Jane Doe");
    }

    #[test]
    fn test_rejected_extension_sets_banner_only() {
        let mut state = WizardState::new();
        let err = state.select_file(Path::new("cv.pdf")).unwrap_err();
        assert!(matches!(err, WizardError::InvalidFileType { .. }));
        assert_eq!(state.error(), Some("Please upload a .doc or .docx file"));
        assert!(state.file().is_none());
        assert!(!state.is_processing());
        assert_eq!(state.step(), WizardStep::Upload);
    }

    #[test]
    fn test_failed_upload_stays_on_step_one() {
        let mut state = WizardState::new();
        state.select_file(Path::new("cv.doc")).unwrap();
        state
            .finish_upload(Err("Document appears to be empty".to_string()))
            .unwrap();
        assert_eq!(state.step(), WizardStep::Upload);
        assert_eq!(state.error(), Some("Document appears to be empty"));
        assert!(state.file().is_some());
        assert!(!state.is_processing());

        // a new selection clears the banner
        state.select_file(Path::new("cv2.docx")).unwrap();
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_cannot_select_while_processing() {
        let mut state = WizardState::new();
        state.select_file(Path::new("cv.doc")).unwrap();
        assert!(state.select_file(Path::new("other.docx")).is_err());
        assert_eq!(state.file().unwrap().name, "cv.doc");
    }

    #[test]
    fn test_out_of_order_transitions_are_rejected() {
        let mut state = WizardState::new();
        assert!(state.choose_template(TemplateId::Minimal).is_err());
        assert!(state.generate().is_err());
        assert!(state.export_request().is_err());
        assert!(state.start_editing().is_err());
        assert!(state.finish_upload(Ok(parsed())).is_err());
        assert_eq!(state.selected_template(), TemplateId::Modern);

        let mut state = at_choose_template();
        assert!(state.select_file(Path::new("cv.docx")).is_err());
        state.generate().unwrap();
        assert!(matches!(
            state.choose_template(TemplateId::Creative),
            Err(WizardError::InvalidTransition {
                step: WizardStep::Generate,
                ..
            })
        ));
    }

    #[test]
    fn test_editing_save_merges_copy() {
        let mut state = at_choose_template();
        state.start_editing().unwrap();
        state.edit_field(ResumeField::Phone, "555-0100").unwrap();
        assert!(state.add_skill("  SQL ").unwrap());
        assert!(!state.add_skill("Rust").unwrap());
        assert!(!state.add_skill("   ").unwrap());
        assert_eq!(state.remove_skill(1).unwrap(), "Go");

        // parsed data untouched until save
        assert_eq!(state.parsed().unwrap().phone, "");

        let saved = state.save_edits().unwrap();
        assert_eq!(saved.phone, "555-0100");
        assert_eq!(saved.skills, vec!["Rust", "SQL"]);
        assert!(!state.is_editing());
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut state = at_choose_template();
        state.start_editing().unwrap();
        state.edit_field(ResumeField::Name, "J. Doe").unwrap();
        state.cancel_edits();
        assert_eq!(state.parsed().unwrap().name, "Jane Doe");
        assert!(matches!(
            state.edit_field(ResumeField::Name, "x"),
            Err(WizardError::NotEditing)
        ));
        assert!(matches!(
            state.remove_skill(0),
            Err(WizardError::NotEditing)
        ));
    }

    #[test]
    fn test_remove_skill_out_of_range() {
        let mut state = at_choose_template();
        state.start_editing().unwrap();
        assert!(matches!(
            state.remove_skill(5),
            Err(WizardError::SkillIndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_generate_saves_open_edits() {
        let mut state = at_choose_template();
        state.start_editing().unwrap();
        state.edit_field(ResumeField::Summary, "Builds things").unwrap();
        state.generate().unwrap();
        assert!(!state.is_editing());
        assert_eq!(
            state.export_request().unwrap().resume_data.summary,
            "Builds things"
        );
    }

    #[test]
    fn test_reset_keeps_template() {
        let mut state = at_choose_template();
        state.choose_template(TemplateId::Creative).unwrap();
        state.generate().unwrap();
        state.record_error("Failed to generate PDF");

        state.reset();
        assert_eq!(state.step(), WizardStep::Upload);
        assert!(state.file().is_none());
        assert!(state.parsed().is_none());
        assert!(state.error().is_none());
        assert_eq!(state.selected_template(), TemplateId::Creative);
    }
}
