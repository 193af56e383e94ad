//! Fixed token vocabulary: operators, separators and reserved words
//!
//! One literal per line. The line number is the token's code: lines 1-11 are
//! operators, 12-22 separators, the rest reserved words. A line holding the
//! two characters `\n` stands for the newline character.

use crate::file_processor::{self, FileProcessorError};
use crate::logging::codes;
use crate::utils::tokenize;
use crate::{log_error, log_success, log_warning};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Last line holding an operator
pub const OPERATOR_LINES: u32 = 11;
/// Last line holding a separator
pub const SEPARATOR_LINES: u32 = 22;
/// Code emitted for identifiers
pub const IDENTIFIER_CODE: u32 = 37;
/// Code emitted for constants
pub const CONSTANT_CODE: u32 = 38;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    Operator,
    Separator,
    ReservedWord,
    Identifier,
    Constant,
}

impl TokenCategory {
    /// Category implied by a vocabulary line number
    pub fn for_line(line: u32) -> Self {
        if line <= OPERATOR_LINES {
            TokenCategory::Operator
        } else if line <= SEPARATOR_LINES {
            TokenCategory::Separator
        } else {
            TokenCategory::ReservedWord
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Operator => "operator",
            TokenCategory::Separator => "separator",
            TokenCategory::ReservedWord => "reserved word",
            TokenCategory::Identifier => "identifier",
            TokenCategory::Constant => "constant",
        }
    }

    /// True for categories stored in the symbol table
    pub fn uses_symbol_table(&self) -> bool {
        matches!(self, TokenCategory::Identifier | TokenCategory::Constant)
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum VocabularyError {
    #[error("Token vocabulary defines no tokens")]
    Empty,

    #[error(transparent)]
    File(#[from] FileProcessorError),
}

impl VocabularyError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            VocabularyError::Empty => codes::vocabulary::EMPTY_VOCABULARY,
            VocabularyError::File(e) => e.error_code(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub category: TokenCategory,
    pub code: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TokenVocabulary {
    entries: HashMap<String, VocabularyEntry>,
    order: Vec<String>,
}

impl TokenVocabulary {
    /// Parse vocabulary text; the first occurrence of a literal wins
    pub fn parse(text: &str) -> Result<Self, VocabularyError> {
        let mut vocabulary = Self::default();

        for (index, raw) in tokenize(text, '\n').iter().enumerate() {
            let line = index as u32 + 1;
            let raw = raw.as_str();
            let literal = match raw.strip_suffix('\r').unwrap_or(raw) {
                "\\n" => "\n",
                other => other,
            };

            if literal.is_empty() {
                continue;
            }
            if vocabulary.entries.contains_key(literal) {
                log_warning!(code = codes::vocabulary::DUPLICATE_TOKEN,
                    "Duplicate vocabulary token ignored",
                    "token" => literal.escape_default(),
                    "line" => line);
                continue;
            }

            vocabulary.entries.insert(
                literal.to_string(),
                VocabularyEntry {
                    category: TokenCategory::for_line(line),
                    code: line,
                },
            );
            vocabulary.order.push(literal.to_string());
        }

        if vocabulary.is_empty() {
            let error = VocabularyError::Empty;
            log_error!(error.error_code(), "Token vocabulary is empty");
            return Err(error);
        }

        Ok(vocabulary)
    }

    /// Read and parse a vocabulary file
    pub fn from_file(path: &Path) -> Result<Self, VocabularyError> {
        let text = file_processor::read_text(path)?;
        let vocabulary = Self::parse(&text)?;

        log_success!(codes::success::VOCABULARY_LOADED, "Token vocabulary loaded",
            "path" => path.display(),
            "operators" => vocabulary.count(TokenCategory::Operator),
            "separators" => vocabulary.count(TokenCategory::Separator),
            "reserved_words" => vocabulary.count(TokenCategory::ReservedWord));

        Ok(vocabulary)
    }

    pub fn lookup(&self, literal: &str) -> Option<VocabularyEntry> {
        self.entries.get(literal).copied()
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.entries.contains_key(literal)
    }

    pub fn category(&self, literal: &str) -> Option<TokenCategory> {
        self.lookup(literal).map(|entry| entry.category)
    }

    pub fn code(&self, literal: &str) -> Option<u32> {
        self.lookup(literal).map(|entry| entry.code)
    }

    pub fn is_operator(&self, literal: &str) -> bool {
        self.category(literal) == Some(TokenCategory::Operator)
    }

    pub fn is_separator(&self, literal: &str) -> bool {
        self.category(literal) == Some(TokenCategory::Separator)
    }

    pub fn is_reserved_word(&self, literal: &str) -> bool {
        self.category(literal) == Some(TokenCategory::ReservedWord)
    }

    pub fn count(&self, category: TokenCategory) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.category == category)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Literals with their entries in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, VocabularyEntry)> + '_ {
        self.order
            .iter()
            .filter_map(|literal| self.lookup(literal).map(|entry| (literal.as_str(), entry)))
    }
}
