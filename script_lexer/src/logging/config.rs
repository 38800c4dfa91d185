//! Logging configuration
//!
//! Buffer sizes come from compile-time constants; level and output format are
//! runtime preferences that may be set once at startup.

use crate::config::compile_time::logging::{LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH};
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Get minimum log level preferred by the user
pub fn get_min_log_level() -> EventsLogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if console logging is enabled
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Get the in-memory event buffer size
pub fn get_log_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Get maximum log message length
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if !(100..=100_000).contains(&LOG_BUFFER_SIZE) {
        return Err(format!("Log buffer size out of range: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_MESSAGE_LENGTH == 0 {
        return Err("Max log message length must be positive".to_string());
    }

    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         - Log buffer size: {}\n\
         - Max message length: {}\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}",
        LOG_BUFFER_SIZE,
        MAX_LOG_MESSAGE_LENGTH,
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_compile_time_constants() {
        assert_eq!(get_log_buffer_size(), LOG_BUFFER_SIZE);
        assert!(get_max_log_message_length() > 0);
    }

    #[test]
    fn test_config_summary() {
        let summary = get_config_summary();
        assert!(summary.contains("Log buffer size"));
        assert!(summary.contains("Min log level"));
    }
}
