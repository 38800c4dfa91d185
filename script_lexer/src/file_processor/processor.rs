//! File processor implementation with compile-time limits and global logging integration

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty: {path}")]
    EmptyFile { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading {path}: {message}")]
    IoError { path: String, message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::EmptyFile { .. } => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(path: &str, error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.to_string(),
            },
            std::io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                path: path.to_string(),
            },
            _ => FileProcessorError::IoError {
                path: path.to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path, or the display name for in-memory sources
    pub path: PathBuf,
    pub size: u64,
    pub line_count: usize,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    /// Get file size in human-readable format
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

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// Loaded source text and its metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// True if the source holds only whitespace
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }

    /// Characters per millisecond
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.char_count() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

/// Loads source files within the compile-time size limit
#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub reject_empty_files: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            reject_empty_files: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            reject_empty_files: prefs.reject_empty_files,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_empty_files_rejected(mut self, reject: bool) -> Self {
        self.reject_empty_files = reject;
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    /// Get the compile-time maximum file size
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read and validate a source file
    pub fn process_file(&self, file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();

        log_debug!("Starting file processing", "file" => file_path);

        let path = self.validate_path(file_path)?;

        let metadata = fs::metadata(&path).map_err(|e| {
            let error = FileProcessorError::from_io(file_path, &e);
            log_error!(error.error_code(), "Failed to read file metadata",
                "file" => file_path,
                "io_error" => e);
            error
        })?;

        self.check_size(metadata.len(), file_path)?;

        let bytes = fs::read(&path).map_err(|e| {
            let error = FileProcessorError::from_io(file_path, &e);
            log_error!(error.error_code(), "Failed to read file",
                "file" => file_path,
                "io_error" => e);
            error
        })?;

        let source = self.decode(bytes, file_path)?;
        let file_metadata = FileMetadata {
            path,
            size: metadata.len(),
            line_count: source.lines().count(),
            modified: metadata.modified().ok(),
        };

        self.finish(source, file_metadata, start_time, file_path)
    }

    /// Read source text from a reader such as stdin, applying the same limits
    pub fn process_reader<R: Read>(
        &self,
        name: &str,
        reader: R,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();

        let mut bytes = Vec::new();
        reader
            .take(MAX_FILE_SIZE + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| {
                let error = FileProcessorError::from_io(name, &e);
                log_error!(error.error_code(), "Failed to read input",
                    "source" => name,
                    "io_error" => e);
                error
            })?;

        self.check_size(bytes.len() as u64, name)?;

        let size = bytes.len() as u64;
        let source = self.decode(bytes, name)?;
        let file_metadata = FileMetadata {
            path: PathBuf::from(name),
            size,
            line_count: source.lines().count(),
            modified: None,
        };

        self.finish(source, file_metadata, start_time, name)
    }

    fn finish(
        &self,
        source: String,
        metadata: FileMetadata,
        start_time: Instant,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        if self.reject_empty_files && source.is_empty() {
            let error = FileProcessorError::EmptyFile {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File is empty", "file" => file_path);
            return Err(error);
        }

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result, file_path);
        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_ms,
                "chars_per_ms" => format!("{:.2}", result.processing_rate()),
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "lines" => result.metadata.line_count
            );
        }
    }

    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        path.canonicalize().map_err(|e| {
            let error = FileProcessorError::from_io(file_path, &e);
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path,
                "io_error" => e);
            error
        })
    }

    fn check_size(&self, size: u64, file_path: &str) -> Result<(), FileProcessorError> {
        if size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_bytes" => size,
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }
        Ok(())
    }

    fn decode(&self, bytes: Vec<u8>, file_path: &str) -> Result<String, FileProcessorError> {
        String::from_utf8(bytes).map_err(|e| {
            let error = FileProcessorError::InvalidEncoding {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Invalid UTF-8 encoding",
                "file" => file_path,
                "valid_up_to" => e.utf8_error().valid_up_to());
            error
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}
