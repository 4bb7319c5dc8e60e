pub mod session;
pub mod templates;
pub mod wizard;

pub use crate::domain::model::{ExportFormat, ExportRequest, ResumeData, ResumeField};
pub use crate::domain::ports::{ResumeBackend, Storage};
pub use crate::utils::error::Result;
