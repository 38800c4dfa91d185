// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to record diagnostics for dropped non-blank characters
    pub report_unrecognized_characters: bool,

    /// Whether to log a warning event per unrecognized character
    pub log_unrecognized_characters: bool,

    /// Whether to collect per-kind token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to show position information in error messages
    pub include_position_in_errors: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            report_unrecognized_characters: env_flag(env_vars::LEXICAL_REPORT_UNRECOGNIZED, true),
            log_unrecognized_characters: env_flag(env_vars::LEXICAL_LOG_UNRECOGNIZED, false),
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
            include_position_in_errors: env_flag(env_vars::LEXICAL_INCLUDE_POSITIONS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to reject files that are empty
    pub reject_empty_files: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            reject_empty_files: env_flag(env_vars::FILE_REJECT_EMPTY, false),
            enable_performance_logging: env_flag(env_vars::FILE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Preferred minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub file_processor: FileProcessorPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a runtime configuration from TOML text. Missing sections and
    /// keys fall back to their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a runtime configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_REPORT_UNRECOGNIZED: &str = "SCRIPT_LEXER_REPORT_UNRECOGNIZED";
    pub const LEXICAL_LOG_UNRECOGNIZED: &str = "SCRIPT_LEXER_LOG_UNRECOGNIZED";
    pub const LEXICAL_DETAILED_METRICS: &str = "SCRIPT_LEXER_DETAILED_METRICS";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "SCRIPT_LEXER_INCLUDE_POSITIONS";

    // File Processor
    pub const FILE_REJECT_EMPTY: &str = "SCRIPT_LEXER_REJECT_EMPTY_FILES";
    pub const FILE_PERFORMANCE_LOGGING: &str = "SCRIPT_LEXER_PERFORMANCE_LOGGING";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SCRIPT_LEXER_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SCRIPT_LEXER_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SCRIPT_LEXER_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [lexical]
            report_unrecognized_characters = false

            [logging]
            min_log_level = "debug"
            use_structured_logging = true
            "#,
        )
        .unwrap();

        assert!(!config.lexical.report_unrecognized_characters);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(config.logging.use_structured_logging);
    }

    #[test]
    fn test_from_toml_empty_uses_defaults() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        let defaults = RuntimeConfig::default();
        assert_eq!(
            config.lexical.report_unrecognized_characters,
            defaults.lexical.report_unrecognized_characters
        );
        assert_eq!(
            config.file_processor.reject_empty_files,
            defaults.file_processor.reject_empty_files
        );
        assert_eq!(config.logging.min_log_level, defaults.logging.min_log_level);
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = RuntimeConfig::from_toml_str("[logging]\nmin_log_level = \"loud\"");
        assert_matches!(result, Err(ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = RuntimeConfig::load("/nonexistent/script_lexer.toml");
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(!env_vars::LOGGING_MIN_LEVEL.is_empty());
        assert!(env_vars::LEXICAL_REPORT_UNRECOGNIZED.starts_with("SCRIPT_LEXER_"));
    }
}
