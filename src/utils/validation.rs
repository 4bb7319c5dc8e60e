use crate::utils::error::{Result, WizardError};
use std::path::Path;
use url::Url;

pub const ALLOWED_EXTENSIONS: [&str; 2] = ["doc", "docx"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Accepts `.doc` and `.docx` files, case-insensitively. The extension is
/// whatever follows the last `.` in the file name, so `.docx` itself counts.
pub fn validate_resume_file(path: &Path) -> Result<()> {
    let accepted = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false);

    if accepted {
        Ok(())
    } else {
        Err(WizardError::InvalidFileType {
            file_name: path.display().to_string(),
        })
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(WizardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_file_extensions() {
        assert!(validate_resume_file(Path::new("cv.docx")).is_ok());
        assert!(validate_resume_file(Path::new("/tmp/old/cv.doc")).is_ok());
        assert!(validate_resume_file(Path::new("CV.DOCX")).is_ok());

        for bad in ["cv.pdf", "cv", "cv.docx.txt", ".docx.bak", "/tmp/v1.docx/cv"] {
            let err = validate_resume_file(Path::new(bad)).unwrap_err();
            assert!(matches!(err, WizardError::InvalidFileType { .. }), "{bad}");
        }
    }

    #[test]
    fn test_bare_extension_file_names_are_accepted() {
        assert!(validate_resume_file(Path::new(".docx")).is_ok());
        assert!(validate_resume_file(Path::new("/home/jane/.DOC")).is_ok());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api", "http://localhost:5000/api").is_ok());
        assert!(validate_url("api", "https://resume.example.com/api").is_ok());
        assert!(validate_url("api", "").is_err());
        assert!(validate_url("api", "ftp://example.com").is_err());
        assert!(validate_url("api", "not a url").is_err());
    }

    #[test]
    fn test_validate_path_and_numbers() {
        assert!(validate_path("out", "./downloads").is_ok());
        assert!(validate_path("out", "").is_err());
        assert!(validate_path("out", "a\0b").is_err());

        assert!(validate_positive_number("width", 60, 40).is_ok());
        assert!(validate_positive_number("width", 10, 40).is_err());

        assert!(validate_non_empty_string("name", "Jane").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }
}
