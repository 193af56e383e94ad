//! Character-level scanner producing the PIF and the symbol table
//!
//! Characters accumulate in a pending buffer until a separator ends the
//! token. `<<` and `>>` are recognized with one character of lookahead.
//! Each finished token is classified against the vocabulary, then the
//! identifier automaton, then the constant recognizers.

use super::constants::ConstantPatterns;
use super::error::{LexicalError, ScannerSetupError};
use crate::automaton::FiniteAutomaton;
use crate::config::compile_time::lexical::{MAX_TOKEN_COUNT, MAX_TOKEN_LENGTH};
use crate::config::runtime::ScannerPreferences;
use crate::file_processor;
use crate::logging::codes;
use crate::symbols::{SymbolPosition, SymbolTable};
use crate::tokens::{
    PifRecord, ProgramInternalForm, TokenCategory, TokenVocabulary, CONSTANT_CODE,
    IDENTIFIER_CODE,
};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success};
use serde::Serialize;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

/// Per-category token counts for one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStatistics {
    pub total_tokens: usize,
    pub operators: usize,
    pub separators: usize,
    pub reserved_words: usize,
    pub identifiers: usize,
    pub constants: usize,
    pub symbol_count: usize,
    pub lines: u32,
}

impl ScanStatistics {
    fn record(&mut self, category: TokenCategory) {
        self.total_tokens += 1;
        match category {
            TokenCategory::Operator => self.operators += 1,
            TokenCategory::Separator => self.separators += 1,
            TokenCategory::ReservedWord => self.reserved_words += 1,
            TokenCategory::Identifier => self.identifiers += 1,
            TokenCategory::Constant => self.constants += 1,
        }
    }
}

/// Token under construction and where it started
#[derive(Debug, Default)]
struct PendingToken {
    text: String,
    start: Position,
    length: usize,
}

pub struct Scanner {
    vocabulary: TokenVocabulary,
    identifier_fa: FiniteAutomaton,
    integer_fa: FiniteAutomaton,
    constants: ConstantPatterns,
    preferences: ScannerPreferences,
    symbol_table: SymbolTable,
    pif: ProgramInternalForm,
    statistics: ScanStatistics,
}

impl Scanner {
    pub fn new(
        vocabulary: TokenVocabulary,
        identifier_fa: FiniteAutomaton,
        integer_fa: FiniteAutomaton,
    ) -> Result<Self, ScannerSetupError> {
        Ok(Self {
            vocabulary,
            identifier_fa,
            integer_fa,
            constants: ConstantPatterns::new()?,
            preferences: ScannerPreferences::default(),
            symbol_table: SymbolTable::new(),
            pif: ProgramInternalForm::new(),
            statistics: ScanStatistics::default(),
        })
    }

    /// Load the vocabulary and both automata from their files
    pub fn from_files(
        vocabulary: &Path,
        identifier_fa: &Path,
        integer_fa: &Path,
    ) -> Result<Self, ScannerSetupError> {
        let vocabulary = TokenVocabulary::from_file(vocabulary)?;
        let identifier_fa = FiniteAutomaton::from_file(identifier_fa)
            .map_err(ScannerSetupError::IdentifierAutomaton)?;
        let integer_fa = FiniteAutomaton::from_file(integer_fa)
            .map_err(ScannerSetupError::IntegerAutomaton)?;

        Self::new(vocabulary, identifier_fa, integer_fa)
    }

    /// Load collaborators from the paths in `preferences` and keep its options
    pub fn from_preferences(preferences: &ScannerPreferences) -> Result<Self, ScannerSetupError> {
        let scanner = Self::from_files(
            &preferences.token_file,
            &preferences.identifier_automaton,
            &preferences.integer_automaton,
        )?;
        Ok(scanner.with_preferences(preferences.clone()))
    }

    pub fn with_preferences(mut self, preferences: ScannerPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn preferences(&self) -> &ScannerPreferences {
        &self.preferences
    }

    pub fn vocabulary(&self) -> &TokenVocabulary {
        &self.vocabulary
    }

    pub fn pif(&self) -> &ProgramInternalForm {
        &self.pif
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn statistics(&self) -> &ScanStatistics {
        &self.statistics
    }

    /// Hand over the scan results
    pub fn into_results(self) -> (ProgramInternalForm, SymbolTable, ScanStatistics) {
        (self.pif, self.symbol_table, self.statistics)
    }

    pub fn is_operator(&self, token: &str) -> bool {
        self.vocabulary.is_operator(token)
    }

    pub fn is_separator(&self, token: &str) -> bool {
        self.vocabulary.is_separator(token)
    }

    pub fn is_reserved_word(&self, token: &str) -> bool {
        self.vocabulary.is_reserved_word(token)
    }

    pub fn is_identifier(&self, token: &str) -> bool {
        self.identifier_fa.accepts(token)
    }

    pub fn is_constant(&self, token: &str) -> bool {
        self.integer_fa.accepts(token) || self.constants.matches(token)
    }

    /// Category a token would be classified as, without recording it
    pub fn classify(&self, token: &str) -> Option<TokenCategory> {
        if let Some(category) = self.vocabulary.category(token) {
            Some(category)
        } else if self.is_identifier(token) {
            Some(TokenCategory::Identifier)
        } else if self.is_constant(token) {
            Some(TokenCategory::Constant)
        } else {
            None
        }
    }

    /// Vocabulary code, else 37 for identifiers, else 38 for constants
    pub fn token_code(&self, token: &str) -> Option<u32> {
        match self.classify(token)? {
            TokenCategory::Identifier => Some(IDENTIFIER_CODE),
            TokenCategory::Constant => Some(CONSTANT_CODE),
            _ => self.vocabulary.code(token),
        }
    }

    /// Read `path` and scan its contents
    pub fn scan_file(&mut self, path: &Path) -> Result<(), LexicalError> {
        let source = file_processor::read_text(path)?;
        self.scan(&source)
    }

    /// Scan `source`, replacing the results of any previous scan.
    ///
    /// On error the PIF and symbol table hold the tokens recognized before
    /// the failure.
    pub fn scan(&mut self, source: &str) -> Result<(), LexicalError> {
        self.symbol_table = SymbolTable::with_capacity(self.symbol_table.capacity());
        self.pif = ProgramInternalForm::new();
        self.statistics = ScanStatistics::default();

        log_debug!("Starting scan",
            "chars" => source.chars().count(),
            "max_tokens" => MAX_TOKEN_COUNT);

        let mut chars = source.chars().peekable();
        let mut position = Position::start();
        let mut pending = PendingToken::default();

        while let Some(ch) = chars.next() {
            let start = position;
            position = position.advance(ch);

            match ch {
                '\t' => {}
                '\r' if chars.peek() == Some(&'\n') => {}
                '<' | '>' => {
                    self.scan_angle_bracket(ch, start, &mut chars, &mut position, &mut pending)?
                }
                _ if self.is_separator_char(ch) => {
                    self.flush(&mut pending)?;
                    self.process_token(&ch.to_string(), start)?;
                }
                _ => {
                    if pending.text.is_empty() {
                        pending.start = start;
                    }
                    pending.text.push(ch);
                    pending.length += 1;

                    if pending.length > MAX_TOKEN_LENGTH {
                        let error = LexicalError::TokenTooLong {
                            line: pending.start.line,
                            column: pending.start.column,
                            length: pending.length,
                        };
                        log_error!(error.error_code(), "Token exceeds maximum length",
                            span = Span::new(pending.start, position),
                            "max_length" => MAX_TOKEN_LENGTH);
                        return Err(error);
                    }
                }
            }
        }

        self.flush(&mut pending)?;

        self.statistics.symbol_count = self.symbol_table.len();
        self.statistics.lines = line_count(source, position);

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Scan completed",
            "tokens" => self.statistics.total_tokens,
            "identifiers" => self.statistics.identifiers,
            "constants" => self.statistics.constants,
            "symbols" => self.statistics.symbol_count);

        Ok(())
    }

    fn is_separator_char(&self, ch: char) -> bool {
        let mut buffer = [0u8; 4];
        self.vocabulary.is_separator(ch.encode_utf8(&mut buffer))
    }

    /// Handle `<` or `>`: a doubled bracket is one operator; a lone one is
    /// emitted by itself or, with lone brackets disabled, dropped together
    /// with the character after it.
    fn scan_angle_bracket(
        &mut self,
        bracket: char,
        start: Position,
        chars: &mut Peekable<Chars<'_>>,
        position: &mut Position,
        pending: &mut PendingToken,
    ) -> Result<(), LexicalError> {
        if chars.peek() == Some(&bracket) {
            chars.next();
            *position = position.advance(bracket);
            self.flush(pending)?;
            let doubled: String = [bracket, bracket].iter().collect();
            return self.process_token(&doubled, start);
        }

        if self.preferences.emit_lone_angle_brackets {
            self.flush(pending)?;
            return self.process_token(&bracket.to_string(), start);
        }

        if let Some(next) = chars.next() {
            *position = position.advance(next);
        }
        Ok(())
    }

    fn flush(&mut self, pending: &mut PendingToken) -> Result<(), LexicalError> {
        if pending.text.is_empty() {
            return Ok(());
        }
        let token = std::mem::take(pending);
        self.process_token(&token.text, token.start)
    }

    /// Classify one token and append its PIF record
    fn process_token(&mut self, token: &str, start: Position) -> Result<(), LexicalError> {
        if self.pif.len() >= MAX_TOKEN_COUNT {
            let error = LexicalError::TooManyTokens {
                count: self.pif.len() + 1,
            };
            log_error!(error.error_code(), "Token limit exceeded",
                span = Span::single(start),
                "limit" => MAX_TOKEN_COUNT);
            return Err(error);
        }

        let (position, code, category) = if let Some(entry) = self.vocabulary.lookup(token) {
            (None, entry.code, entry.category)
        } else if self.is_identifier(token) {
            let position = self.symbol_table.insert_if_absent(token);
            (Some(position), IDENTIFIER_CODE, TokenCategory::Identifier)
        } else if self.is_constant(token) {
            let position = self.symbol_table.insert_if_absent(token);
            (Some(position), CONSTANT_CODE, TokenCategory::Constant)
        } else {
            let error = LexicalError::Incorrect {
                line: start.line,
                column: start.column,
                lexeme: token.to_string(),
            };
            log_error!(error.error_code(), "Token is lexically incorrect",
                span = Span::covering(start, token),
                "lexeme" => token.escape_default());
            return Err(error);
        };

        if self.preferences.log_classifications {
            log_debug!("Token classified",
                "token" => token.escape_default(),
                "category" => category,
                "position" => format_position(position),
                "code" => code);
        }

        self.statistics.record(category);
        self.pif.push(PifRecord::new(token, position, code, category));
        Ok(())
    }
}

/// Lines holding content; a trailing newline does not open a new line
fn line_count(source: &str, end: Position) -> u32 {
    let newlines = end.line - 1;
    if source.is_empty() || source.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

fn format_position(position: Option<SymbolPosition>) -> String {
    let (bucket, offset) = SymbolPosition::pair_or_missing(position);
    format!("({},{})", bucket, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const IDENTIFIER_RULES: &str = "states:q0,q1\n\
        alphabet:[a.z|A.Z]=letter,[0.9]=digit\n\
        initial:q0\n\
        final:q1\n\
        transitions:q0|q1=[letter],q1|q1=[letter.digit]\n";

    const INTEGER_RULES: &str = "states:q0,q1,q2,q3\n\
        alphabet:[0]=zero,[1.9]=nonzero,[+|-]=sign\n\
        initial:q0\n\
        final:q1,q3\n\
        transitions:q0|q1=[zero],q0|q2=[sign],q0|q3=[nonzero],q2|q3=[nonzero],q3|q3=[zero.nonzero]\n";

    /// Operators on lines 1-11, separators on 12-22, reserved words after
    fn vocabulary_text() -> String {
        let lines = [
            "+", "-", "*", "/", "%", "=", "==", "<", ">", "<<", ">>", // operators
            "[", "]", "{", "}", "(", ")", ";", ",", " ", "\\n", ":", // separators
            "int", "if", "else", "while", "read", "write",
        ];
        lines.join("\n")
    }

    fn scanner() -> Scanner {
        Scanner::new(
            TokenVocabulary::parse(&vocabulary_text()).unwrap(),
            FiniteAutomaton::parse(IDENTIFIER_RULES).unwrap(),
            FiniteAutomaton::parse(INTEGER_RULES).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_identifier_then_separator() {
        let mut scanner = scanner();
        scanner.scan("x;").unwrap();

        let bucket = scanner.symbol_table().hash("x");
        let records = scanner.pif().records();
        assert_eq!(
            records,
            &[
                PifRecord::new(
                    "x",
                    Some(SymbolPosition::new(bucket, 0)),
                    37,
                    TokenCategory::Identifier
                ),
                PifRecord::new(";", None, 18, TokenCategory::Separator),
            ]
        );
        assert_eq!(
            scanner.symbol_table().search("x"),
            Some(SymbolPosition::new(bucket, 0))
        );
    }

    #[test]
    fn test_semicolon_code_with_semicolon_on_line_twelve() {
        let text = ["+", "-", "*", "/", "%", "=", "==", "<", ">", "<<", ">>", ";"].join("\n");
        let mut scanner = Scanner::new(
            TokenVocabulary::parse(&text).unwrap(),
            FiniteAutomaton::parse(IDENTIFIER_RULES).unwrap(),
            FiniteAutomaton::parse(INTEGER_RULES).unwrap(),
        )
        .unwrap();

        scanner.scan("x;").unwrap();
        let records = scanner.pif().records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].to_string(), "(;)->(-1,-1)|12");
    }

    #[test]
    fn test_shift_operator_is_one_record() {
        let mut scanner = scanner();
        scanner.scan("<<").unwrap();

        let records = scanner.pif().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].token, "<<");
        assert_eq!(records[0].code, 10);
        assert_eq!(records[0].category, TokenCategory::Operator);
    }

    #[test]
    fn test_shift_flushes_pending_buffer() {
        let mut scanner = scanner();
        scanner.scan("a>>b").unwrap();

        let tokens: Vec<_> = scanner.pif().iter().map(|r| r.token.as_str()).collect();
        assert_eq!(tokens, vec!["a", ">>", "b"]);
    }

    #[test]
    fn test_lone_angle_bracket_is_its_own_token() {
        let mut scanner = scanner();
        scanner.scan("a<b").unwrap();

        let tokens: Vec<_> = scanner.pif().iter().map(|r| r.token.as_str()).collect();
        assert_eq!(tokens, vec!["a", "<", "b"]);
        assert_eq!(scanner.pif().records()[1].code, 8);
    }

    #[test]
    fn test_lone_angle_bracket_legacy_mode() {
        let preferences = ScannerPreferences {
            emit_lone_angle_brackets: false,
            ..ScannerPreferences::default()
        };
        let mut scanner = scanner().with_preferences(preferences);
        scanner.scan("a<b;").unwrap();

        // '<' and 'b' are both dropped, so "a" is the pending token at ';'
        let tokens: Vec<_> = scanner.pif().iter().map(|r| r.token.as_str()).collect();
        assert_eq!(tokens, vec!["a", ";"]);
    }

    #[test]
    fn test_error_reports_line_and_lexeme() {
        let mut scanner = scanner();
        let result = scanner.scan("int x;\nx = 1;\ny = $z;\n");

        assert_matches!(
            result,
            Err(LexicalError::Incorrect { line: 3, column: 5, ref lexeme }) if lexeme == "$z"
        );
        // Tokens before the failure are kept
        assert!(scanner.symbol_table().exists("y"));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Line 3: $z is lexically incorrect"
        );
    }

    #[test]
    fn test_constants_and_reserved_words() {
        let mut scanner = scanner();
        scanner
            .scan("int a;\na = -12;\nif (a == true) write(\"ok\");\n")
            .unwrap();

        // "true" is accepted by the identifier automaton before the
        // constant patterns are consulted
        let stats = scanner.statistics();
        assert_eq!(stats.reserved_words, 3);
        assert_eq!(stats.identifiers, 4);
        assert_eq!(stats.constants, 2);
        assert_eq!(stats.symbol_count, 4);
        assert_eq!(stats.lines, 3);

        let a_position = scanner.symbol_table().search("a");
        let a_records: Vec<_> = scanner
            .pif()
            .iter()
            .filter(|r| r.token == "a")
            .collect();
        assert_eq!(a_records.len(), 3);
        assert!(a_records.iter().all(|r| r.position == a_position));

        let constant = scanner.pif().iter().find(|r| r.token == "-12").unwrap();
        assert_eq!(constant.code, 38);
        assert_eq!(constant.category, TokenCategory::Constant);
    }

    #[test]
    fn test_whitespace_records_and_tabs() {
        let mut scanner = scanner();
        scanner.scan("\tint x;\n").unwrap();

        let rendered = scanner.pif().to_string();
        assert_eq!(
            rendered.lines().collect::<Vec<_>>(),
            vec![
                "(int)->(-1,-1)|23",
                "(SPACE)->(-1,-1)|20",
                format!("(x)->({},0)|37", scanner.symbol_table().hash("x")).as_str(),
                "(;)->(-1,-1)|18",
                "(NEW_LINE)->(-1,-1)|21",
            ]
        );
    }

    #[test]
    fn test_tab_does_not_split_tokens() {
        let mut scanner = scanner();
        scanner.scan("ab\tc;").unwrap();
        assert_eq!(scanner.pif().records()[0].token, "abc");
    }

    #[test]
    fn test_crlf_input() {
        let mut scanner = scanner();
        scanner.scan("x;\r\ny;\r\n").unwrap();
        assert_eq!(scanner.pif().count(TokenCategory::Identifier), 2);
    }

    #[test]
    fn test_trailing_token_is_flushed() {
        let mut scanner = scanner();
        scanner.scan("x = 10").unwrap();

        let last = scanner.pif().records().last().unwrap();
        assert_eq!(last.token, "10");
        assert_eq!(last.category, TokenCategory::Constant);
    }

    #[test]
    fn test_line_count_ignores_trailing_newline() {
        let mut scanner = scanner();

        scanner.scan("x;\ny;\n").unwrap();
        assert_eq!(scanner.statistics().lines, 2);

        scanner.scan("x;\ny;").unwrap();
        assert_eq!(scanner.statistics().lines, 2);

        scanner.scan("").unwrap();
        assert_eq!(scanner.statistics().lines, 0);
    }

    #[test]
    fn test_rescan_resets_results() {
        let mut scanner = scanner();
        scanner.scan("alpha;").unwrap();
        scanner.scan("beta;").unwrap();

        assert!(!scanner.symbol_table().exists("alpha"));
        assert!(scanner.symbol_table().exists("beta"));
        assert_eq!(scanner.pif().len(), 2);
    }

    #[test]
    fn test_token_too_long() {
        let mut scanner = scanner();
        let long = "a".repeat(MAX_TOKEN_LENGTH + 1);
        assert_matches!(
            scanner.scan(&long),
            Err(LexicalError::TokenTooLong { line: 1, column: 1, .. })
        );
    }

    #[test]
    fn test_classification_queries() {
        let scanner = scanner();

        assert!(scanner.is_operator("=="));
        assert!(scanner.is_separator(";"));
        assert!(scanner.is_reserved_word("while"));
        assert!(scanner.is_identifier("count1"));
        assert!(scanner.is_constant("0"));
        assert!(scanner.is_constant("\"text\""));
        assert!(!scanner.is_constant("1a"));

        assert_eq!(scanner.token_code("while"), Some(26));
        assert_eq!(scanner.token_code("count"), Some(IDENTIFIER_CODE));
        assert_eq!(scanner.token_code("42"), Some(CONSTANT_CODE));
        assert_eq!(scanner.token_code("$"), None);
        assert_eq!(scanner.classify("false"), Some(TokenCategory::Identifier));
    }
}
