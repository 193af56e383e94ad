//! Configuration module for the FA lexer
//! Compile-time limits are generated from TOML configuration by build.rs

// Generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    ConfigError, FileProcessorPreferences, LoggingPreferences, RuntimeConfig, ScannerPreferences,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("FA_LEXER_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("FA_LEXER_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

/// Human-readable summary of the compile-time limits
pub fn limits_summary() -> String {
    use compile_time::*;

    let mut summary = String::new();
    summary.push_str(&format!("Configuration: {}\n", build_info::source_info()));
    summary.push_str(&format!(
        "  max_file_size: {}\n",
        file_processing::MAX_FILE_SIZE
    ));
    summary.push_str(&format!(
        "  max_line_count: {}\n",
        file_processing::MAX_LINE_COUNT
    ));
    summary.push_str(&format!(
        "  max_rule_lines: {}\n",
        automaton::MAX_RULE_LINES
    ));
    summary.push_str(&format!(
        "  max_range_span: {}\n",
        automaton::MAX_RANGE_SPAN
    ));
    summary.push_str(&format!(
        "  max_token_count: {}\n",
        lexical::MAX_TOKEN_COUNT
    ));
    summary.push_str(&format!(
        "  max_token_length: {}\n",
        lexical::MAX_TOKEN_LENGTH
    ));
    summary.push_str(&format!(
        "  symbol_table_capacity: {}\n",
        symbols::TABLE_CAPACITY
    ));
    summary
}
