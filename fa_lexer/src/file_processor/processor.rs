//! File processor implementation with compile-time limits and global logging integration

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty: {path}")]
    EmptyFile { path: String },

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

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } | FileProcessorError::TooManyLines { .. } => {
                codes::file_processing::FILE_TOO_LARGE
            }
            FileProcessorError::EmptyFile { .. } => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    fn from_io(error: &io::Error, path: &Path) -> Self {
        let path_str = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound { path: path_str },
            io::ErrorKind::PermissionDenied => {
                FileProcessorError::PermissionDenied { path: path_str }
            }
            io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding { path: path_str },
            _ => FileProcessorError::IoError {
                message: format!("'{}': {}", path_str, error),
            },
        }
    }
}

/// Metadata collected while reading a file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    pub line_count: usize,
}

impl FileMetadata {
    /// File size in human-readable format
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

/// Contents of a file that passed every limit check
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl SourceFile {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

/// Reads text files under the compile-time size and line limits
#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub enable_performance_logging: bool,
    pub reject_empty_files: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: true,
            reject_empty_files: false,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            enable_performance_logging: prefs.enable_performance_logging,
            reject_empty_files: prefs.reject_empty_files,
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

    /// Read `path` as UTF-8 text
    pub fn read(&self, path: &Path) -> Result<SourceFile, FileProcessorError> {
        let start_time = Instant::now();
        let path_str = path.display().to_string();

        log_debug!("Starting file processing", "file" => path_str);

        if path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath { path: path_str };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let meta = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path);
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path_str,
                "io_error" => e);
            error
        })?;

        if !meta.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: path_str.clone(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => path_str);
            return Err(error);
        }

        let size = meta.len();
        if size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => path_str,
                "size_bytes" => size,
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        if size == 0 && self.reject_empty_files {
            let error = FileProcessorError::EmptyFile {
                path: path_str.clone(),
            };
            log_error!(error.error_code(), "File is empty", "file" => path_str);
            return Err(error);
        }

        let source = fs::read_to_string(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path);
            log_error!(error.error_code(), "Failed to read file",
                "file" => path_str,
                "io_error" => e);
            error
        })?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => path_str,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT);
            return Err(error);
        }

        let result = SourceFile {
            source,
            metadata: FileMetadata {
                path: path.to_path_buf(),
                size,
                line_count,
            },
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result, &path_str);
        Ok(result)
    }

    fn log_processing_success(&self, result: &SourceFile, file_path: &str) {
        if self.enable_performance_logging {
            let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file_path,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_ms
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "lines" => result.metadata.line_count
            );
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}
