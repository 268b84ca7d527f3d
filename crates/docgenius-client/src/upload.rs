use crate::error::{ApiError, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// Multipart field name the backend reads the upload from
pub const UPLOAD_FIELD: &str = "file";

const DEFAULT_MIME: &str = "application/pdf";

/// In-memory file ready to be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            mime: DEFAULT_MIME.to_string(),
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    /// Read a file from disk; the upload keeps the file's own name
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ApiError::Unexpected(format!("Path {} has no file name", path.display()))
            })?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Unexpected(format!("Failed to read {}: {}", path.display(), e)))?;

        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub(crate) fn into_form(self) -> Result<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(|e| ApiError::Unexpected(format!("Invalid MIME type '{}': {}", self.mime, e)))?;
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_from_path_reads_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.1\n%EOF\n").unwrap();

        let upload = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "report.pdf");
        assert_eq!(upload.size(), 14);
        assert_eq!(upload.mime, "application/pdf");
    }

    #[tokio::test]
    async fn test_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = UploadFile::from_path(dir.path().join("missing.pdf")).await;
        assert!(matches!(result, Err(ApiError::Unexpected(_))));
    }

    #[test]
    fn test_invalid_mime_rejected() {
        let upload = UploadFile::new("a.pdf", vec![1]).with_mime("not a mime");
        assert!(upload.into_form().is_err());
    }
}
