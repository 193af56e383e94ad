// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Invalid configuration in {path}: {message}")]
    Invalid { path: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ConfigError::Unreadable { .. } => crate::logging::codes::file_processing::IO_ERROR,
            ConfigError::Invalid { .. } => crate::logging::codes::system::INITIALIZATION_FAILURE,
        }
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_path(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerPreferences {
    /// Token vocabulary file (operators, separators, reserved words)
    pub token_file: PathBuf,

    /// Rule file of the identifier automaton
    pub identifier_automaton: PathBuf,

    /// Rule file of the integer constant automaton
    pub integer_automaton: PathBuf,

    /// Directory receiving PIF.out and ST.out
    pub output_dir: PathBuf,

    /// Emit a lone `<` or `>` as its own token instead of dropping it with the next character
    pub emit_lone_angle_brackets: bool,

    /// Whether to log every classification decision at debug level
    pub log_classifications: bool,
}

impl Default for ScannerPreferences {
    fn default() -> Self {
        Self {
            token_file: env_path(env_vars::SCANNER_TOKEN_FILE, "token.txt"),
            identifier_automaton: env_path(
                env_vars::SCANNER_IDENTIFIER_AUTOMATON,
                "FA-identifier.in",
            ),
            integer_automaton: env_path(env_vars::SCANNER_INTEGER_AUTOMATON, "FA-integer.in"),
            output_dir: env_path(env_vars::SCANNER_OUTPUT_DIR, "."),
            emit_lone_angle_brackets: env_bool(env_vars::SCANNER_EMIT_LONE_ANGLE_BRACKETS, true),
            log_classifications: env_bool(env_vars::SCANNER_LOG_CLASSIFICATIONS, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,

    /// Whether an empty source program is rejected
    pub reject_empty_files: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            enable_performance_logging: env_bool(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
            reject_empty_files: env_bool(env_vars::REJECT_EMPTY_FILES, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_bool(env_vars::LOGGING_USE_STRUCTURED, false),
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

    /// Convert to events::LogLevel
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
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
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
    pub scanner: ScannerPreferences,
    pub file_processor: FileProcessorPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a runtime configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Invalid {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a runtime configuration file
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content, &origin)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Scanner
    pub const SCANNER_TOKEN_FILE: &str = "FA_LEXER_TOKEN_FILE";
    pub const SCANNER_IDENTIFIER_AUTOMATON: &str = "FA_LEXER_IDENTIFIER_AUTOMATON";
    pub const SCANNER_INTEGER_AUTOMATON: &str = "FA_LEXER_INTEGER_AUTOMATON";
    pub const SCANNER_OUTPUT_DIR: &str = "FA_LEXER_OUTPUT_DIR";
    pub const SCANNER_EMIT_LONE_ANGLE_BRACKETS: &str = "FA_LEXER_EMIT_LONE_ANGLE_BRACKETS";
    pub const SCANNER_LOG_CLASSIFICATIONS: &str = "FA_LEXER_LOG_CLASSIFICATIONS";

    // File Processor
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "FA_LEXER_ENABLE_PERFORMANCE_LOGGING";
    pub const REJECT_EMPTY_FILES: &str = "FA_LEXER_REJECT_EMPTY_FILES";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "FA_LEXER_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "FA_LEXER_LOGGING_MIN_LEVEL";
}
