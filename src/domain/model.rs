use crate::utils::error::{Result, WizardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A resume as extracted by the backend. Nothing here is validated locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Scalar fields the user may edit in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeField {
    Name,
    Email,
    Phone,
    Location,
    Linkedin,
    Summary,
}

impl ResumeField {
    pub const ALL: [ResumeField; 6] = [
        ResumeField::Name,
        ResumeField::Email,
        ResumeField::Phone,
        ResumeField::Location,
        ResumeField::Linkedin,
        ResumeField::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeField::Name => "name",
            ResumeField::Email => "email",
            ResumeField::Phone => "phone",
            ResumeField::Location => "location",
            ResumeField::Linkedin => "linkedin",
            ResumeField::Summary => "summary",
        }
    }
}

impl FromStr for ResumeField {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self> {
        ResumeField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WizardError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for ResumeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl ResumeData {
    pub fn field(&self, field: ResumeField) -> &str {
        match field {
            ResumeField::Name => &self.name,
            ResumeField::Email => &self.email,
            ResumeField::Phone => &self.phone,
            ResumeField::Location => &self.location,
            ResumeField::Linkedin => &self.linkedin,
            ResumeField::Summary => &self.summary,
        }
    }

    pub fn set_field(&mut self, field: ResumeField, value: impl Into<String>) {
        let slot = match field {
            ResumeField::Name => &mut self.name,
            ResumeField::Email => &mut self.email,
            ResumeField::Phone => &mut self.phone,
            ResumeField::Location => &mut self.location,
            ResumeField::Linkedin => &mut self.linkedin,
            ResumeField::Summary => &mut self.summary,
        };
        *slot = value.into();
    }
}

/// Body returned by `POST /upload` and `POST /update-data`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub success: bool,
    pub data: Option<ResumeData>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub resume_data: ResumeData,
    pub template: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub version: Option<String>,
    pub message: Option<String>,
    pub spacy_loaded: Option<bool>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Docx => "DOCX",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "generate-pdf",
            ExportFormat::Docx => "generate-docx",
        }
    }

    /// `resume_<epoch millis>.<ext>`, the name a browser download would get.
    pub fn download_file_name(&self, timestamp_millis: i64) -> String {
        format!("resume_{}.{}", timestamp_millis, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ExportFormat {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            other => Err(WizardError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Expected pdf or docx".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_defaults() {
        let data: ResumeData = serde_json::from_value(serde_json::json!({
            "name": "Jane Doe",
            "skills": ["Rust", "SQL"],
            "experience": [{"title": "Engineer", "company": "Acme"}],
            "raw_text": "ignored"
        }))
        .unwrap();

        assert_eq!(data.name, "Jane Doe");
        assert_eq!(data.email, "");
        assert_eq!(data.skills, vec!["Rust", "SQL"]);
        assert_eq!(data.experience[0].period, "");
        assert!(data.education.is_empty());
        assert_eq!(data.score, None);
    }

    #[test]
    fn test_export_request_wire_shape() {
        let request = ExportRequest {
            resume_data: ResumeData {
                name: "Jane".to_string(),
                ..Default::default()
            },
            template: "minimal".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["template"], "minimal");
        assert_eq!(value["resumeData"]["name"], "Jane");
        assert!(value["resumeData"].get("score").is_none());
    }

    #[test]
    fn test_upload_error_envelope_without_success_flag() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"error": "Only .doc and .docx files are supported"}"#).unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(
            response.error.as_deref(),
            Some("Only .doc and .docx files are supported")
        );
    }

    #[test]
    fn test_field_lookup() {
        let mut data = ResumeData::default();
        let field: ResumeField = "LinkedIn".parse().unwrap();
        data.set_field(field, "linkedin.com/in/jane");
        assert_eq!(data.field(ResumeField::Linkedin), "linkedin.com/in/jane");
        assert!("skills".parse::<ResumeField>().is_err());
    }

    #[test]
    fn test_export_format_naming() {
        assert_eq!(
            ExportFormat::Pdf.download_file_name(1_700_000_000_000),
            "resume_1700000000000.pdf"
        );
        assert_eq!("DOCX".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert!("rtf".parse::<ExportFormat>().is_err());
    }
}
