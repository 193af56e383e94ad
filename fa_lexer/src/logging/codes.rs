//! Consolidated error codes and classification system
//!
//! Single source of truth for all event codes, their metadata, and classification functions.

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
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
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

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const LEXICALLY_INCORRECT: Code = Code::new("E020");
    pub const TOKEN_TOO_LONG: Code = Code::new("E023");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
    pub const PATTERN_COMPILATION: Code = Code::new("E029");
}

/// Automaton rule file codes
pub mod automaton {
    use super::Code;

    pub const INVALID_ALPHABET_ATOM: Code = Code::new("E060");
    pub const REVERSED_RANGE: Code = Code::new("E061");
    pub const RANGE_TOO_WIDE: Code = Code::new("E062");
    pub const TOO_MANY_RULE_LINES: Code = Code::new("E063");
    pub const INCONSISTENT_DEFINITION: Code = Code::new("W060");
    pub const SKIPPED_RULE_LINE: Code = Code::new("W061");
}

/// Token vocabulary codes
pub mod vocabulary {
    use super::Code;

    pub const EMPTY_VOCABULARY: Code = Code::new("E070");
    pub const DUPLICATE_TOKEN: Code = Code::new("W070");
}

/// Symbol table codes
pub mod symbols {
    use super::Code;

    pub const KEY_NOT_FOUND: Code = Code::new("W090");
}

/// Output generation codes
pub mod output {
    use super::Code;

    pub const WRITE_FAILED: Code = Code::new("E100");
    pub const SERIALIZATION_FAILED: Code = Code::new("E101");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const AUTOMATON_LOADED: Code = Code::new("I010");
    pub const VOCABULARY_LOADED: Code = Code::new("I011");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const OUTPUT_WRITTEN: Code = Code::new("I030");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

/// Halting failure: not recoverable, stops the current operation
const fn failure(
    code: &'static str,
    category: &'static str,
    severity: Severity,
    description: &'static str,
    action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata::new(code, category, severity, false, true, description, action)
}

/// Warning or success notice: recoverable, never halts
const fn notice(
    code: &'static str,
    category: &'static str,
    description: &'static str,
    action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata::new(code, category, Severity::Low, true, false, description, action)
}

const METADATA: &[ErrorMetadata] = &[
    // System
    failure("ERR001", "System", Severity::Critical, "Internal error",
        "Report the failure with the input files that triggered it"),
    failure("ERR002", "System", Severity::Critical, "System initialization failed",
        "Check configuration files and environment variables"),
    // File processing
    failure("E005", "FileProcessing", Severity::Medium, "File not found", "Verify the file path"),
    failure("E007", "FileProcessing", Severity::High,
        "File exceeds the configured size or line limit",
        "Split the input or raise the compile-time limits"),
    notice("E008", "FileProcessing", "File is empty", "Provide a non-empty file"),
    failure("E009", "FileProcessing", Severity::Medium, "Permission denied", "Check file permissions"),
    failure("E010", "FileProcessing", Severity::Medium, "File is not valid UTF-8",
        "Re-encode the file as UTF-8"),
    failure("E011", "FileProcessing", Severity::High, "I/O error", "Check the file system and retry"),
    failure("E012", "FileProcessing", Severity::Medium, "Invalid file path",
        "Provide a path to a regular file"),
    // Lexical
    failure("E020", "Lexical", Severity::High,
        "Token is not a vocabulary entry, identifier, or constant",
        "Fix the offending lexeme at the reported line"),
    failure("E023", "Lexical", Severity::High, "Token exceeds the maximum token length",
        "Shorten the token or raise lexical.max_token_length"),
    failure("E027", "Lexical", Severity::High, "Too many tokens in program",
        "Split the program or raise lexical.max_token_count"),
    failure("E029", "Lexical", Severity::Critical, "Constant recognizer pattern failed to compile",
        "Report the failure; the built-in patterns are static"),
    // Automaton
    failure("E060", "Automaton", Severity::High, "Alphabet atom is malformed",
        "Use single characters or a.b ranges in alphabet class specs"),
    failure("E061", "Automaton", Severity::High, "Character range is reversed",
        "Write ranges with the lower character first"),
    failure("E062", "Automaton", Severity::High, "Character range is wider than allowed",
        "Narrow the range or raise automaton.max_range_span"),
    failure("E063", "Automaton", Severity::High, "Rule file has too many lines",
        "Simplify the automaton or raise automaton.max_rule_lines"),
    notice("W060", "Automaton", "Automaton references undeclared states or aliases",
        "Declare every state and alias used by the transitions"),
    notice("W061", "Automaton", "Rule line skipped", "Check the label:value syntax of the line"),
    // Vocabulary
    failure("E070", "Vocabulary", Severity::High, "Token vocabulary is empty",
        "Provide operators, separators and reserved words, one per line"),
    notice("W070", "Vocabulary", "Token listed more than once; the first listing keeps its code",
        "Remove the duplicate line"),
    // Symbols
    notice("W090", "Symbols", "Key not found in the symbol table", "No action required"),
    // Output
    failure("E100", "Output", Severity::High, "Failed to write scan output",
        "Check that the output directory exists and is writable"),
    failure("E101", "Output", Severity::Medium, "Failed to serialize the scan report",
        "Report the failure"),
    // Success
    notice("I001", "System", "Logging system initialized", "Continue"),
    notice("I006", "FileProcessing", "File read successfully", "Continue"),
    notice("I010", "Automaton", "Automaton loaded", "Continue"),
    notice("I011", "Vocabulary", "Token vocabulary loaded", "Continue"),
    notice("I020", "Lexical", "Program is lexically correct", "Continue"),
    notice("I030", "Output", "Scan output written", "Continue"),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| METADATA.iter().map(|entry| (entry.code, entry)).collect())
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
