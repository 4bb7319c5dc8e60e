use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Saves downloads under a base directory, creating it on first write.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(full_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("downloads");
        let storage = LocalStorage::new(base.to_str().unwrap());

        let saved = storage
            .write_file("nested/resume_1.pdf", b"%PDF-1.4")
            .await
            .unwrap();
        assert!(saved.ends_with("resume_1.pdf"));
        assert_eq!(std::fs::read(&saved).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap());

        storage.write_file("resume_2.docx", b"old").await.unwrap();
        let saved = storage.write_file("resume_2.docx", b"new").await.unwrap();
        assert_eq!(std::fs::read(saved).unwrap(), b"new");
    }
}
