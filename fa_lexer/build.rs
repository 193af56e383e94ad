// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    automaton: AutomatonLimits,
    lexical: LexicalLimits,
    symbols: SymbolLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
struct AutomatonLimits {
    max_rule_lines: usize,
    max_range_span: u32,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_token_count: usize,
    max_token_length: usize,
}

#[derive(serde::Deserialize)]
struct SymbolLimits {
    table_capacity: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
    log_buffer_size: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=FA_LEXER_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=FA_LEXER_CONFIG_DIR");

    let profile = env::var("FA_LEXER_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("FA_LEXER_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the fa_lexer directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());
    println!("cargo:rustc-env=FA_LEXER_BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=FA_LEXER_CONFIG_DIR={}", config_dir);

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }

    if config.symbols.table_capacity == 0 {
        panic!("LIMITS: symbols.table_capacity must be at least 1");
    }

    if config.lexical.max_token_length == 0 || config.lexical.max_token_count == 0 {
        panic!("LIMITS: lexical limits must be non-zero");
    }

    if config.automaton.max_range_span == 0 {
        panic!("LIMITS: automaton.max_range_span must be non-zero");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const MAX_LINE_COUNT: usize = {};
    }}

    pub mod automaton {{
        pub const MAX_RULE_LINES: usize = {};
        pub const MAX_RANGE_SPAN: u32 = {};
    }}

    pub mod lexical {{
        pub const MAX_TOKEN_COUNT: usize = {};
        pub const MAX_TOKEN_LENGTH: usize = {};
    }}

    pub mod symbols {{
        pub const TABLE_CAPACITY: usize = {};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const LOG_BUFFER_SIZE: usize = {};
    }}
}}
"#,
        profile,
        config.file_processing.max_file_size,
        config.file_processing.max_line_count,
        config.automaton.max_rule_lines,
        config.automaton.max_range_span,
        config.lexical.max_token_count,
        config.lexical.max_token_length,
        config.symbols.table_capacity,
        config.logging.max_log_message_length,
        config.logging.log_buffer_size,
    );

    fs::write(output_path, constants_code).unwrap();
}
