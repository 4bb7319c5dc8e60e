pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpBackend, LocalStorage};
pub use config::WizardConfig;
pub use core::session::{SessionOptions, WizardSession};
pub use core::templates::TemplateId;
pub use core::wizard::{WizardState, WizardStep};
pub use domain::model::{ExportFormat, ResumeData};
pub use utils::error::{Result, WizardError};
