//! Global logging module for the script lexer
//!
//! Provides thread-safe global logging with per-thread file context and a
//! macro interface. Logging before initialization is a silent no-op.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// File currently being processed on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file_path: PathBuf,
}

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// True when an event at `level` would reach the global logger
pub fn is_level_enabled(level: LogLevel) -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(level))
        .unwrap_or(false)
}

// ============================================================================
// FILE CONTEXT MANAGEMENT
// ============================================================================

/// Set file context for current thread
pub fn set_file_context(file_path: PathBuf) {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(FileContext { file_path });
    });
}

/// Clear file context for current thread
pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with file context
pub fn with_file_context<F, R>(file_path: PathBuf, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_file_context(file_path);
    let result = f();
    clear_file_context();
    result
}

/// Get current file context (used by macros)
pub fn get_current_file_context() -> Option<FileContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn emit(mut event: LogEvent, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    if !logger.should_log(event.level) {
        return;
    }

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(file_ctx) = get_current_file_context() {
        event = event.with_context("file", &file_ctx.file_path.display().to_string());
    }

    logger.log_event(event);
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    emit(event, context);
}

/// Log warning with context (used by log_warning! macro)
pub fn log_warning_with_context(code: Option<Code>, message: &str, context: Vec<(&str, &str)>) {
    let event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    emit(event, context);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::success(code, message), context);
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::info(message), context);
}

/// Log debug with context (used by log_debug! macro)
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::debug(message), context);
}

/// Safe error logging; falls back to stderr when uninitialized
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_error(code, message);
    } else {
        eprintln!("[ERROR] {} - {}", code.as_str(), message);
    }
}
