//! Global logging module for the FA lexer
//!
//! Provides a thread-safe global logging service with a coded event model
//! and a small macro interface. Every entry point is a no-op until a service
//! has been installed with `init_global_logging_with_service`.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{Logger, LoggingService, MemoryLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Install the global service (CLI bridge, tests); the first call wins
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

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let mut event = LogEvent::error(code, message);

    if let Some(s) = span {
        event = event.with_span(s);
    }

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    logger.log_event(event);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let mut event = LogEvent::success(code, message);
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    logger.log_event(event);
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let mut event = LogEvent::info(message);
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    logger.log_event(event);
}

/// Global memory logger shared by every test in the crate
#[cfg(test)]
pub(crate) fn test_logger() -> Arc<MemoryLogger> {
    static TEST_LOGGER: OnceLock<Arc<MemoryLogger>> = OnceLock::new();

    TEST_LOGGER
        .get_or_init(|| {
            let logger = Arc::new(MemoryLogger::new());
            let service = Arc::new(LoggingService::new(logger.clone(), LogLevel::Debug));
            init_global_logging_with_service(service)
                .expect("global logger is only installed by test_logger");
            logger
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_service_receives_macro_events() {
        let logger = test_logger();
        assert!(is_initialized());

        log_error_with_context(
            codes::output::WRITE_FAILED,
            "Write failed",
            None,
            vec![("path", "global-service-check/PIF.out")],
        );
        log_info_with_context("Info", vec![("path", "global-service-check")]);

        assert!(logger.get_errors().iter().any(|e| {
            e.code == codes::output::WRITE_FAILED
                && e.context.get("path").map(String::as_str)
                    == Some("global-service-check/PIF.out")
        }));
        assert!(init_global_logging_with_service(Arc::new(LoggingService::new(
            Arc::new(MemoryLogger::new()),
            LogLevel::Debug,
        )))
        .is_err());
    }
}
