//! Logging service and logger backends

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with configuration awareness
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    /// Create new logging service with specified logger and minimum level
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create service with configuration-aware settings.
    ///
    /// With console logging disabled only errors are emitted.
    pub fn with_config() -> Self {
        let min_level = if config::use_console_logging() {
            config::get_min_log_level()
        } else {
            LogLevel::Error
        };

        let logger: Arc<dyn Logger> = if config::use_structured_logging() {
            Arc::new(StructuredLogger::new(min_level))
        } else {
            Arc::new(ConsoleLogger::new(min_level))
        };

        Self::new(logger, min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Set minimum log level
    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Check if level should be logged
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    /// Log an event
    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    pub fn log_error_with_context(
        &self,
        error_code: Code,
        message: &str,
        context: Vec<(&str, &str)>,
    ) {
        let mut event = LogEvent::error(error_code, message);
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        self.log_event(event);
    }

    pub fn log_warning_with_code(&self, warning_code: Code, message: &str) {
        self.log_event(LogEvent::warning_with_code(warning_code, message));
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }

    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// Plain-text logger writing to stderr so stdout stays free for output
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            eprintln!("{}", event.format());
        }
    }
}

/// Structured logger emitting one JSON object per line on stderr
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            // Fall back to plain format if JSON serialization fails
            let line = event.format_json().unwrap_or_else(|_| event.format());
            eprintln!("{}", line);
        }
    }
}

/// Memory logger for testing
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    fn events(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        // A poisoned buffer is still a valid list of events
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events().clone()
    }

    pub fn clear(&self) {
        self.events().clear();
    }

    pub fn event_count(&self) -> usize {
        self.events().len()
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.is_error())
            .cloned()
            .collect()
    }

    pub fn get_warnings(&self) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.is_warning())
            .cloned()
            .collect()
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.events()
            .iter()
            .any(|e| e.is_error() && e.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.events()
            .iter()
            .any(|e| e.is_info() && e.code == code)
    }

    pub fn get_events_by_category(&self, category: &str) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.category() == category)
            .cloned()
            .collect()
    }

    pub fn get_summary(&self) -> EventSummary {
        let events = self.events();

        EventSummary {
            total_count: events.len(),
            error_count: events.iter().filter(|e| e.is_error()).count(),
            warning_count: events.iter().filter(|e| e.is_warning()).count(),
            info_count: events.iter().filter(|e| e.is_info()).count(),
            debug_count: events.iter().filter(|e| e.is_debug()).count(),
        }
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.events();

        // Respect buffer size limits from config
        let max_events = config::get_log_buffer_size();
        if events.len() >= max_events {
            let remove_count = events.len() - max_events + 1;
            events.drain(0..remove_count);
        }

        events.push(event.clone());
    }
}

/// Summary of events in memory logger
#[derive(Debug, Clone, Default)]
pub struct EventSummary {
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub debug_count: usize,
}

impl EventSummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }
}

/// Create logging service based on current configuration
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

/// Create testing logger (memory-based, all events captured)
pub fn create_test_logger() -> Arc<MemoryLogger> {
    Arc::new(MemoryLogger::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_memory_logger() {
        let logger = MemoryLogger::new();

        logger.log(&LogEvent::info("Message 1"));
        logger.log(&LogEvent::error(
            codes::file_processing::FILE_NOT_FOUND,
            "Error message",
        ));
        logger.log(&LogEvent::warning_with_code(
            codes::lexical::UNRECOGNIZED_CHARACTER,
            "Dropped '#'",
        ));

        assert_eq!(logger.event_count(), 3);
        assert_eq!(logger.get_errors().len(), 1);
        assert_eq!(logger.get_warnings().len(), 1);
        assert!(logger.has_error_with_code(codes::file_processing::FILE_NOT_FOUND));
        assert_eq!(
            logger
                .get_events_with_code(codes::lexical::UNRECOGNIZED_CHARACTER)
                .len(),
            1
        );

        let summary = logger.get_summary();
        assert_eq!(summary.total_count, 3);
        assert!(summary.has_errors());
        assert!(summary.has_warnings());
        assert_eq!(summary.info_count, 1);

        logger.clear();
        assert_eq!(logger.event_count(), 0);
    }

    #[test]
    fn test_logging_service() {
        let logger = create_test_logger();
        let service = LoggingService::new(logger.clone(), LogLevel::Debug);

        service.log_error(codes::file_processing::PERMISSION_DENIED, "Test error");
        service.log_success(codes::success::FILE_PROCESSING_SUCCESS, "Test success");
        service.log_info("Test info");
        service.log_debug("Test debug");

        assert_eq!(logger.event_count(), 4);
        assert!(logger.has_error_with_code(codes::file_processing::PERMISSION_DENIED));
        assert!(logger.has_success_with_code(codes::success::FILE_PROCESSING_SUCCESS));
    }

    #[test]
    fn test_log_level_filtering() {
        let logger = create_test_logger();
        let service = LoggingService::new(logger.clone(), LogLevel::Error);

        service.log_debug("Debug message");
        service.log_info("Info message");
        service.log_warning_with_code(codes::lexical::UNRECOGNIZED_CHARACTER, "Warning");
        service.log_error(codes::system::INTERNAL_ERROR, "Error message");

        assert_eq!(logger.event_count(), 1);
        assert!(logger.has_error_with_code(codes::system::INTERNAL_ERROR));
    }

    #[test]
    fn test_event_categorization() {
        let logger = MemoryLogger::new();

        logger.log(&LogEvent::error(
            codes::file_processing::FILE_NOT_FOUND,
            "File error",
        ));
        logger.log(&LogEvent::error(
            codes::token_stream::POSITION_OUT_OF_RANGE,
            "Stream error",
        ));

        assert_eq!(logger.get_events_by_category("FileProcessing").len(), 1);
        assert_eq!(logger.get_events_by_category("TokenStream").len(), 1);
    }

    #[test]
    fn test_context_is_attached() {
        let logger = create_test_logger();
        let service = LoggingService::new(logger.clone(), LogLevel::Debug);

        service.log_error_with_context(
            codes::file_processing::FILE_TOO_LARGE,
            "File too large",
            vec![("size", "1024"), ("limit", "512")],
        );

        let events = logger.get_events();
        assert_eq!(events[0].context.get("size").map(String::as_str), Some("1024"));
    }

    #[test]
    fn test_memory_logger_respects_buffer_size() {
        let logger = MemoryLogger::new();
        let limit = config::get_log_buffer_size();

        for i in 0..limit + 5 {
            logger.log(&LogEvent::info(&format!("event {}", i)));
        }

        assert_eq!(logger.event_count(), limit);
        assert_eq!(logger.get_events()[0].message, "event 5");
    }
}
