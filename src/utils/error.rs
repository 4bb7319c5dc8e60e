use crate::domain::model::ExportFormat;
use crate::core::wizard::WizardStep;
use thiserror::Error;

pub const INVALID_FILE_MESSAGE: &str = "Please upload a .doc or .docx file";
pub const UPLOAD_FALLBACK_MESSAGE: &str = "Failed to process document";
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Failed to download resume";

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Unsupported file type: {file_name}")]
    InvalidFileType { file_name: String },

    #[error("Backend rejected the document: {message}")]
    UploadRejected { message: String },

    #[error("Could not reach backend at {base_url}: {source}")]
    Connection {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend failed to generate {format} (HTTP {status})")]
    ExportFailed { format: ExportFormat, status: u16 },

    #[error("Download failed: {0}")]
    Download(#[source] reqwest::Error),

    #[error("Cannot {action} while on step {step}")]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },

    #[error("No resume data has been extracted yet")]
    NoResumeData,

    #[error("Not editing")]
    NotEditing,

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// `index` is zero-based; the message counts skills from 1.
    #[error("Skill {number} out of range ({len} skills)", number = .index + 1)]
    SkillIndexOutOfRange { index: usize, len: usize },

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, WizardError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Backend,
    State,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WizardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WizardError::InvalidFileType { .. }
            | WizardError::UnknownTemplate(_)
            | WizardError::UnknownField(_)
            | WizardError::SkillIndexOutOfRange { .. } => ErrorCategory::Input,
            WizardError::Connection { .. }
            | WizardError::Download(_)
            | WizardError::HttpError(_) => ErrorCategory::Network,
            WizardError::UploadRejected { .. } | WizardError::ExportFailed { .. } => {
                ErrorCategory::Backend
            }
            WizardError::InvalidTransition { .. }
            | WizardError::NoResumeData
            | WizardError::NotEditing => ErrorCategory::State,
            WizardError::ConfigError { .. }
            | WizardError::MissingConfigError { .. }
            | WizardError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            WizardError::IoError(_) | WizardError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::State => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Backend => ErrorSeverity::High,
            ErrorCategory::Config | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// The banner text shown to the user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            WizardError::InvalidFileType { .. } => INVALID_FILE_MESSAGE.to_string(),
            WizardError::UploadRejected { message } => message.clone(),
            WizardError::Connection { base_url, .. } => format!(
                "Failed to connect to server. Make sure the backend is running at {}.",
                base_url
            ),
            WizardError::ExportFailed { format, .. } => {
                format!("Failed to generate {}", format.label())
            }
            WizardError::Download(_) => DOWNLOAD_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WizardError::InvalidFileType { .. } => "Choose a Word document ending in .doc or .docx",
            WizardError::UploadRejected { .. } => {
                "Check that the document is not empty and try another file"
            }
            WizardError::Connection { .. } | WizardError::HttpError(_) => {
                "Start the resume backend or point --api-url at a running instance"
            }
            WizardError::ExportFailed { .. } => "Try another template or export format",
            WizardError::Download(_) => "Check your network connection and try again",
            WizardError::InvalidTransition { .. }
            | WizardError::NoResumeData
            | WizardError::NotEditing => "Follow the wizard steps in order",
            WizardError::UnknownTemplate(_) => {
                "Run `resume-wizard templates` to list the available templates"
            }
            WizardError::UnknownField(_) => {
                "Editable fields are: name, email, phone, location, linkedin, summary"
            }
            WizardError::SkillIndexOutOfRange { .. } => "Use a skill number from the list",
            WizardError::IoError(_) => "Check file permissions and that the output directory exists",
            WizardError::SerializationError(_) => "The backend returned data in an unexpected shape",
            WizardError::ConfigError { .. }
            | WizardError::MissingConfigError { .. }
            | WizardError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
        }
    }
}
