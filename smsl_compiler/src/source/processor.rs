//! File and in-memory source providers

use super::{SourceError, SourceProvider};
use crate::config::compile_time::source::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::config::runtime::SourcePreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::path::{Path, PathBuf};

pub const SMSL_EXTENSION: &str = "smsl";

#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    pub extension: Option<String>,
    pub is_smsl_file: bool,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Reads a unit from disk, enforcing size, line and extension limits
#[derive(Debug, Clone)]
pub struct FileSource {
    path: String,
    max_file_size: u64,
    max_line_count: usize,
    preferences: SourcePreferences,
}

impl FileSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_preferences(path, SourcePreferences::default())
    }

    pub fn with_preferences(path: impl Into<String>, preferences: SourcePreferences) -> Self {
        Self {
            path: path.into(),
            max_file_size: MAX_FILE_SIZE,
            max_line_count: MAX_LINE_COUNT,
            preferences,
        }
    }

    /// Tighten the compile-time limits. Larger values are clamped to them.
    pub fn with_limits(mut self, max_file_size: u64, max_line_count: usize) -> Self {
        self.max_file_size = max_file_size.min(MAX_FILE_SIZE);
        self.max_line_count = max_line_count.min(MAX_LINE_COUNT);
        self
    }

    pub fn with_extension_required(mut self, required: bool) -> Self {
        self.preferences.require_smsl_extension = required;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn validate_path(&self) -> Result<PathBuf, SourceError> {
        if self.path.is_empty() {
            let error = SourceError::InvalidPath {
                path: self.path.clone(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(&self.path);

        if !path.exists() {
            let error = SourceError::FileNotFound {
                path: self.path.clone(),
            };
            log_error!(error.error_code(), "File not found", "path" => self.path);
            return Err(error);
        }

        if !path.is_file() {
            let error = SourceError::InvalidPath {
                path: self.path.clone(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => self.path);
            return Err(error);
        }

        path.canonicalize().map_err(|e| {
            let error = SourceError::IoError {
                message: format!("Failed to resolve path '{}': {}", self.path, e),
            };
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => self.path,
                "io_error" => e);
            error
        })
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata, SourceError> {
        let metadata = fs::metadata(path).map_err(|e| self.io_failure(path, e))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let is_smsl_file = extension.as_deref() == Some(SMSL_EXTENSION);

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            is_smsl_file,
        };

        log_debug!("File metadata collected",
            "size_human" => file_metadata.human_readable_size(),
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "max_size_bytes" => self.max_file_size);

        Ok(file_metadata)
    }

    fn validate_file(&self, metadata: &FileMetadata) -> Result<(), SourceError> {
        if metadata.size > self.max_file_size {
            let error = SourceError::FileTooLarge {
                size: metadata.size,
                max_size: self.max_file_size,
            };
            log_error!(error.error_code(), "File exceeds maximum size limit",
                "file" => self.path,
                "size_bytes" => metadata.size,
                "limit_bytes" => self.max_file_size);
            return Err(error);
        }

        if self.preferences.require_smsl_extension && !metadata.is_smsl_file {
            let error = SourceError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have the .smsl extension",
                "file" => self.path);
            return Err(error);
        }

        Ok(())
    }

    fn read(&self, path: &Path) -> Result<String, SourceError> {
        let bytes = fs::read(path).map_err(|e| self.io_failure(path, e))?;

        String::from_utf8(bytes).map_err(|e| {
            let error = SourceError::InvalidEncoding {
                path: self.path.clone(),
            };
            log_error!(error.error_code(), "File is not valid UTF-8",
                "file" => self.path,
                "valid_up_to" => e.utf8_error().valid_up_to());
            error
        })
    }

    fn io_failure(&self, path: &Path, e: std::io::Error) -> SourceError {
        let error = match e.kind() {
            std::io::ErrorKind::PermissionDenied => SourceError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => SourceError::IoError {
                message: format!("Failed to read '{}': {}", path.display(), e),
            },
        };
        log_error!(error.error_code(), "Failed to access file",
            "path" => path.display(),
            "io_error" => e);
        error
    }
}

impl SourceProvider for FileSource {
    fn name(&self) -> &str {
        &self.path
    }

    fn read_lines(&self) -> Result<Vec<String>, SourceError> {
        let start_time = std::time::Instant::now();
        log_debug!("Reading source file", "file" => self.path);

        let path = self.validate_path()?;
        let metadata = self.metadata(&path)?;
        self.validate_file(&metadata)?;
        let source = self.read(&path)?;

        let lines: Vec<String> = source.lines().map(str::to_string).collect();
        if lines.len() > self.max_line_count {
            let error = SourceError::TooManyLines {
                lines: lines.len(),
                max_lines: self.max_line_count,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => self.path,
                "lines" => lines.len(),
                "max_lines" => self.max_line_count);
            return Err(error);
        }

        if self.preferences.enable_performance_logging {
            log_success!(
                codes::success::SOURCE_LOADED,
                "Source file loaded",
                "file" => self.path,
                "size_human" => metadata.human_readable_size(),
                "lines" => lines.len(),
                "duration_ms" => format!("{:.2}", start_time.elapsed().as_secs_f64() * 1000.0)
            );
        } else {
            log_success!(codes::success::SOURCE_LOADED, "Source file loaded", "file" => self.path);
        }

        Ok(lines)
    }
}

/// A unit held in memory
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    text: String,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl SourceProvider for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_lines(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.text.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile, TempDir};

    fn smsl_file(contents: &[u8]) -> NamedTempFile {
        let mut file = Builder::new().suffix(".smsl").tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    fn source_for(file: &NamedTempFile) -> FileSource {
        FileSource::new(file.path().to_str().unwrap())
    }

    #[test]
    fn test_reads_lines_in_order() {
        let file = smsl_file(b"state A {\r\naction a;\n}\n");
        let lines = source_for(&file).read_lines().unwrap();

        assert_eq!(lines, vec!["state A {", "action a;", "}"]);
    }

    #[test]
    fn test_empty_file_yields_no_lines() {
        let file = smsl_file(b"");
        assert_eq!(source_for(&file).read_lines().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.smsl");
        let result = FileSource::new(missing.to_str().unwrap()).read_lines();

        assert_matches!(result, Err(SourceError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = TempDir::new().unwrap();
        let result = FileSource::new(dir.path().to_str().unwrap()).read_lines();

        assert_matches!(result, Err(SourceError::InvalidPath { .. }));
    }

    #[test]
    fn test_empty_path() {
        assert_matches!(
            FileSource::new("").read_lines(),
            Err(SourceError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let file = smsl_file(&[0x73, 0x74, 0xff, 0xfe, 0x0a]);
        assert_matches!(
            source_for(&file).read_lines(),
            Err(SourceError::InvalidEncoding { .. })
        );
    }

    #[test]
    fn test_extension_requirement() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"start;\n").unwrap();
        let path = file.path().to_str().unwrap();

        assert!(FileSource::new(path)
            .with_extension_required(false)
            .read_lines()
            .is_ok());
        assert_matches!(
            FileSource::new(path).with_extension_required(true).read_lines(),
            Err(SourceError::InvalidExtension { extension: Some(ext) }) if ext == "txt"
        );
    }

    #[test]
    fn test_size_and_line_limits() {
        let file = smsl_file(b"start;\nend;\n{\n}\n");

        assert_matches!(
            source_for(&file).with_limits(4, MAX_LINE_COUNT).read_lines(),
            Err(SourceError::FileTooLarge { max_size: 4, .. })
        );
        assert_matches!(
            source_for(&file).with_limits(MAX_FILE_SIZE, 3).read_lines(),
            Err(SourceError::TooManyLines { lines: 4, max_lines: 3 })
        );
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new("inline", "start;\n\nend;");
        assert_eq!(source.name(), "inline");
        assert_eq!(source.read_lines().unwrap(), vec!["start;", "", "end;"]);
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::from("a.smsl"),
            size: 2048,
            extension: Some("smsl".into()),
            is_smsl_file: true,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
    }
}
