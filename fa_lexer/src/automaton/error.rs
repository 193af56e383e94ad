//! Automaton rule-file errors

use crate::config::compile_time::automaton::{MAX_RANGE_SPAN, MAX_RULE_LINES};
use crate::file_processor::FileProcessorError;
use crate::logging::codes;

/// Errors raised while building an automaton from its rule file
#[derive(Debug, Clone, thiserror::Error)]
pub enum AutomatonError {
    #[error("Line {line}: range endpoint in '{atom}' must be exactly one character")]
    InvalidRangeBound { line: usize, atom: String },

    #[error("Line {line}: '{atom}' has more than two dot-separated parts")]
    TooManyRangeParts { line: usize, atom: String },

    #[error("Line {line}: empty alphabet atom")]
    EmptyAtom { line: usize },

    #[error("Line {line}: range '{atom}' ends before it starts")]
    ReversedRange { line: usize, atom: String },

    #[error("Line {line}: range '{atom}' spans {span} characters (max {MAX_RANGE_SPAN})")]
    RangeTooWide { line: usize, atom: String, span: u32 },

    #[error("Rule file has {lines} lines (max {MAX_RULE_LINES})")]
    TooManyRuleLines { lines: usize },

    #[error(transparent)]
    File(#[from] FileProcessorError),
}

impl AutomatonError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            AutomatonError::InvalidRangeBound { .. }
            | AutomatonError::TooManyRangeParts { .. }
            | AutomatonError::EmptyAtom { .. } => codes::automaton::INVALID_ALPHABET_ATOM,
            AutomatonError::ReversedRange { .. } => codes::automaton::REVERSED_RANGE,
            AutomatonError::RangeTooWide { .. } => codes::automaton::RANGE_TOO_WIDE,
            AutomatonError::TooManyRuleLines { .. } => codes::automaton::TOO_MANY_RULE_LINES,
            AutomatonError::File(e) => e.error_code(),
        }
    }

    /// True for malformed rule text, false for I/O and limit failures
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            AutomatonError::InvalidRangeBound { .. }
                | AutomatonError::TooManyRangeParts { .. }
                | AutomatonError::EmptyAtom { .. }
                | AutomatonError::ReversedRange { .. }
        )
    }

    /// 1-based rule-file line, when the error points at one
    pub fn line(&self) -> Option<usize> {
        match self {
            AutomatonError::InvalidRangeBound { line, .. }
            | AutomatonError::TooManyRangeParts { line, .. }
            | AutomatonError::EmptyAtom { line }
            | AutomatonError::ReversedRange { line, .. }
            | AutomatonError::RangeTooWide { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}
