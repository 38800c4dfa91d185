//! File processor module with compile-time limits and global logging integration

mod processor;

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

/// Get the compile-time large file threshold
pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}
