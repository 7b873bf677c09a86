//! Upload validation policy.
//!
//! Size and extension checks run before any bytes touch storage. The
//! validator is side-effect-free; rejections convert into
//! `AppError::InvalidInput` at the HTTP boundary.

use std::path::Path;

use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File size too large. Maximum size is {max_mb}MB")]
    FileTooLarge { size: usize, max_mb: usize },

    #[error("Invalid file type. Only {0} files are allowed")]
    InvalidExtension(String),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file")]
    EmptyFile,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Upload validator over the configured policy.
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
        }
    }

    /// Validate file size against the configured ceiling.
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max_mb: self.max_file_size / (1024 * 1024),
            });
        }

        Ok(())
    }

    /// Validate the filename's extension against the accepted set
    /// (case-insensitive).
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            let allowed = self
                .allowed_extensions
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(" and ");
            return Err(ValidationError::InvalidExtension(allowed));
        }

        Ok(())
    }

    /// Full upload check: extension first, then size.
    pub fn validate(&self, filename: &str, size: usize) -> Result<(), ValidationError> {
        self.validate_extension(filename)?;
        self.validate_file_size(size)?;
        Ok(())
    }
}
