//! File processor module: bounded, logged reading of programs and rule files

mod processor;

use crate::config::runtime::FileProcessorPreferences;
use std::path::Path;

pub use processor::{FileMetadata, FileProcessor, FileProcessorError, SourceFile};

/// Read a file with default preferences
pub fn read_source(path: &Path) -> Result<SourceFile, FileProcessorError> {
    FileProcessor::new().read(path)
}

/// Read a file and keep only its contents
pub fn read_text(path: &Path) -> Result<String, FileProcessorError> {
    read_source(path).map(|file| file.source)
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}
