//! Scanner errors

use crate::automaton::AutomatonError;
use crate::config::compile_time::lexical::{MAX_TOKEN_COUNT, MAX_TOKEN_LENGTH};
use crate::file_processor::FileProcessorError;
use crate::logging::codes;
use crate::tokens::VocabularyError;

/// Failures while scanning a program. The scan stops at the first one.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexicalError {
    #[error("Line {line}: {lexeme} is lexically incorrect")]
    Incorrect {
        line: u32,
        column: u32,
        lexeme: String,
    },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Line {line}: token of {length} characters (max {MAX_TOKEN_LENGTH})")]
    TokenTooLong { line: u32, column: u32, length: usize },

    #[error(transparent)]
    Source(#[from] FileProcessorError),
}

impl LexicalError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexicalError::Incorrect { .. } => codes::lexical::LEXICALLY_INCORRECT,
            LexicalError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexicalError::TokenTooLong { .. } => codes::lexical::TOKEN_TOO_LONG,
            LexicalError::Source(e) => e.error_code(),
        }
    }

    /// 1-based line of the failing token
    pub fn line(&self) -> Option<u32> {
        match self {
            LexicalError::Incorrect { line, .. } | LexicalError::TokenTooLong { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }

    /// The offending text for classification failures
    pub fn lexeme(&self) -> Option<&str> {
        match self {
            LexicalError::Incorrect { lexeme, .. } => Some(lexeme),
            _ => None,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// Failures while assembling a scanner from its collaborators
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScannerSetupError {
    #[error("Token vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),

    #[error("Identifier automaton: {0}")]
    IdentifierAutomaton(AutomatonError),

    #[error("Integer automaton: {0}")]
    IntegerAutomaton(AutomatonError),

    #[error("Constant pattern failed to compile: {message}")]
    Pattern { message: String },
}

impl ScannerSetupError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScannerSetupError::Vocabulary(e) => e.error_code(),
            ScannerSetupError::IdentifierAutomaton(e) | ScannerSetupError::IntegerAutomaton(e) => {
                e.error_code()
            }
            ScannerSetupError::Pattern { .. } => codes::lexical::PATTERN_COMPILATION,
        }
    }
}

impl From<regex::Error> for ScannerSetupError {
    fn from(error: regex::Error) -> Self {
        ScannerSetupError::Pattern {
            message: error.to_string(),
        }
    }
}
