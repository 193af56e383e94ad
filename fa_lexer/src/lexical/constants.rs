//! Pattern-based constant recognizers complementing the integer automaton

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantKind {
    Integer,
    Boolean,
    String,
}

/// Compiled literal patterns for signed integers, booleans and
/// double-quoted strings
#[derive(Debug, Clone)]
pub struct ConstantPatterns {
    integer: Regex,
    boolean: Regex,
    string: Regex,
}

impl ConstantPatterns {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            integer: Regex::new(r"^[-+]?[0-9]+$")?,
            boolean: Regex::new(r"^(true|false)$")?,
            string: Regex::new(r#"^".*"$"#)?,
        })
    }

    pub fn kind(&self, text: &str) -> Option<ConstantKind> {
        if self.integer.is_match(text) {
            Some(ConstantKind::Integer)
        } else if self.boolean.is_match(text) {
            Some(ConstantKind::Boolean)
        } else if self.string.is_match(text) {
            Some(ConstantKind::String)
        } else {
            None
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.kind(text).is_some()
    }
}
