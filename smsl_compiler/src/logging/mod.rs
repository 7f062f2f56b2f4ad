//! Global logging for the SMSL compiler
//!
//! A process-wide [`LoggingService`] is installed once with
//! [`init_global_logging`]. Until then every logging macro is a no-op, so the
//! library stays silent when embedded or under test. A thread-local source
//! context tags each event with the compilation unit being processed.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static SOURCE_CONTEXT: RefCell<Option<String>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from the installed runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    let logging_service = Arc::new(service::create_configured_service());
    init_global_logging_with_service(logging_service.clone())?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with a custom service (tests and embedding hosts)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Whether debug events would reach the logger
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

// ============================================================================
// SOURCE CONTEXT MANAGEMENT
// ============================================================================

pub fn set_source_context(unit_name: &str) {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(unit_name.to_string());
    });
}

pub fn clear_source_context() {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with the compilation unit name attached to every event
pub fn with_source_context<F, R>(unit_name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_source_context(unit_name);
    let result = f();
    clear_source_context();
    result
}

pub fn get_current_source_context() -> Option<String> {
    SOURCE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn dispatch(mut event: LogEvent, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if config::include_source_context() {
        if let Some(unit) = get_current_source_context() {
            event = event.with_context("source", &unit);
        }
    }

    logger.log_event(event);
}

/// Log error with context (used by `log_error!`)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    line: Option<usize>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);
    if let Some(line) = line {
        event = event.with_line(line);
    }
    dispatch(event, context);
}

/// Log a prepared event with context (used by the other logging macros)
pub fn log_with_context(event: LogEvent, context: Vec<(&str, &str)>) {
    dispatch(event, context);
}

/// Error logging that falls back to stderr when logging is uninitialized
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_context_management() {
        assert!(get_current_source_context().is_none());

        set_source_context("traffic_light.smsl");
        assert_eq!(
            get_current_source_context().as_deref(),
            Some("traffic_light.smsl")
        );

        clear_source_context();
        assert!(get_current_source_context().is_none());
    }

    #[test]
    fn test_with_source_context() {
        let result = with_source_context("door.smsl", || {
            assert_eq!(get_current_source_context().as_deref(), Some("door.smsl"));
            42
        });

        assert_eq!(result, 42);
        assert!(get_current_source_context().is_none());
    }

    #[test]
    fn test_macros_do_not_panic_without_service() {
        crate::log_error!(codes::lexical::UNKNOWN_LEXEME, "Unknown lexeme", line = 3, "lexeme" => "$");
        crate::log_success!(codes::success::TOKENIZATION_COMPLETE, "done", "tokens" => 3);
        crate::log_info!("info", "flag" => true);
        crate::log_warning!("warning");
        crate::log_debug!("debug", "count" => 1);
        safe_log_error(codes::system::INTERNAL_ERROR, "fallback path");
    }
}
