//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification
//! functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            description,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Lexical analysis codes
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_CHARACTER: Code = Code::new("E020");
    pub const DIAGNOSTIC_LIMIT_REACHED: Code = Code::new("W021");
}

/// Token stream codes
pub mod token_stream {
    use super::Code;

    pub const POSITION_OUT_OF_RANGE: Code = Code::new("E030");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E031");
    pub const UNEXPECTED_END_OF_STREAM: Code = Code::new("E032");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

const REGISTERED: &[ErrorMetadata] = &[
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        "Critical internal system error",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        "System initialization failure",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::High,
        false,
        "Runtime configuration could not be loaded",
    ),
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::Medium,
        false,
        "Source file not found",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::High,
        false,
        "Source file exceeds the compile-time size limit",
    ),
    ErrorMetadata::new(
        "E008",
        "FileProcessing",
        Severity::Low,
        true,
        "Source file is empty",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::Medium,
        false,
        "Permission denied reading source file",
    ),
    ErrorMetadata::new(
        "E010",
        "FileProcessing",
        Severity::Medium,
        false,
        "Source file is not valid UTF-8",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::Medium,
        false,
        "I/O error reading source file",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::Medium,
        false,
        "Invalid source file path",
    ),
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::Low,
        true,
        "Character does not start any token and was dropped",
    ),
    ErrorMetadata::new(
        "W021",
        "Lexical",
        Severity::Low,
        true,
        "Diagnostic limit reached; further diagnostics suppressed",
    ),
    ErrorMetadata::new(
        "E030",
        "TokenStream",
        Severity::Medium,
        true,
        "Requested stream position is out of range",
    ),
    ErrorMetadata::new(
        "E031",
        "TokenStream",
        Severity::Medium,
        true,
        "Token kind does not match the expected kind",
    ),
    ErrorMetadata::new(
        "E032",
        "TokenStream",
        Severity::Medium,
        true,
        "Token stream ended while a token was expected",
    ),
];

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTERED
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let metadata = get_error_metadata(lexical::UNRECOGNIZED_CHARACTER.as_str()).unwrap();
        assert_eq!(metadata.category, "Lexical");
        assert!(metadata.recoverable);
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("NOPE"), "Unknown error");
        assert_eq!(get_category("NOPE"), "Unknown");
        assert_eq!(get_severity("NOPE"), Severity::Medium);
        assert!(is_recoverable("NOPE"));
    }

    #[test]
    fn test_every_error_code_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            system::CONFIGURATION_ERROR,
            file_processing::FILE_NOT_FOUND,
            file_processing::FILE_TOO_LARGE,
            file_processing::EMPTY_FILE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            lexical::UNRECOGNIZED_CHARACTER,
            lexical::DIAGNOSTIC_LIMIT_REACHED,
            token_stream::POSITION_OUT_OF_RANGE,
            token_stream::UNEXPECTED_TOKEN,
            token_stream::UNEXPECTED_END_OF_STREAM,
        ];

        for code in codes {
            assert_ne!(get_description(code.as_str()), "Unknown error", "{}", code);
        }
    }

    #[test]
    fn test_success_codes_are_not_errors() {
        assert!(get_error_metadata(success::TOKENIZATION_COMPLETE.as_str()).is_none());
    }
}
