//! Source providers
//!
//! A provider yields the ordered raw lines of one compilation unit. Files go
//! through [`FileSource`], which enforces the compile-time size and line
//! limits; [`InMemorySource`] serves tests and embedded programs.

mod processor;

use crate::logging::codes;

pub use processor::{FileMetadata, FileSource, InMemorySource, SMSL_EXTENSION};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .smsl, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl SourceError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SourceError::FileNotFound { .. } => codes::source::FILE_NOT_FOUND,
            SourceError::InvalidExtension { .. } => codes::source::INVALID_EXTENSION,
            SourceError::FileTooLarge { .. } => codes::source::FILE_TOO_LARGE,
            SourceError::PermissionDenied { .. } => codes::source::PERMISSION_DENIED,
            SourceError::InvalidEncoding { .. } => codes::source::INVALID_ENCODING,
            SourceError::IoError { .. } => codes::source::IO_ERROR,
            SourceError::InvalidPath { .. } => codes::source::INVALID_PATH,
            SourceError::TooManyLines { .. } => codes::source::TOO_MANY_LINES,
        }
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// Supplies the raw lines of one compilation unit
pub trait SourceProvider {
    /// Display name used in logs and reports
    fn name(&self) -> &str;

    fn read_lines(&self) -> Result<Vec<String>, SourceError>;
}

impl<P: SourceProvider + ?Sized> SourceProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read_lines(&self) -> Result<Vec<String>, SourceError> {
        (**self).read_lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_map_to_source_category() {
        let error = SourceError::FileNotFound {
            path: "missing.smsl".into(),
        };
        assert_eq!(error.error_code(), codes::source::FILE_NOT_FOUND);
        assert_eq!(error.category(), "Source");
    }
}
