//! Program Internal Form: the classified token stream

use super::vocabulary::TokenCategory;
use crate::symbols::SymbolPosition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One recognized token in scan order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PifRecord {
    /// Token text as scanned
    pub token: String,
    /// Table position for identifiers and constants
    pub position: Option<SymbolPosition>,
    pub code: u32,
    pub category: TokenCategory,
}

impl PifRecord {
    pub fn new(
        token: impl Into<String>,
        position: Option<SymbolPosition>,
        code: u32,
        category: TokenCategory,
    ) -> Self {
        Self {
            token: token.into(),
            position,
            code,
            category,
        }
    }

    /// Token text with whitespace replaced by its canonical name
    pub fn display_text(&self) -> &str {
        display_name(&self.token)
    }

    /// `(bucket, offset)`, or `(-1,-1)` for vocabulary tokens
    pub fn position_pair(&self) -> (i64, i64) {
        SymbolPosition::pair_or_missing(self.position)
    }
}

impl fmt::Display for PifRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bucket, offset) = self.position_pair();
        write!(
            f,
            "({})->({},{})|{}",
            self.display_text(),
            bucket,
            offset,
            self.code
        )
    }
}

/// Canonical name for whitespace tokens
pub fn display_name(token: &str) -> &str {
    match token {
        "\t" => "TAB",
        " " => "SPACE",
        "\n" => "NEW_LINE",
        other => other,
    }
}

/// Append-only token record list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInternalForm {
    records: Vec<PifRecord>,
}

impl ProgramInternalForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PifRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[PifRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PifRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, category: TokenCategory) -> usize {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .count()
    }
}

impl<'a> IntoIterator for &'a ProgramInternalForm {
    type Item = &'a PifRecord;
    type IntoIter = std::slice::Iter<'a, PifRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for ProgramInternalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rendering() {
        let identifier = PifRecord::new(
            "x",
            Some(SymbolPosition::new(20, 0)),
            37,
            TokenCategory::Identifier,
        );
        assert_eq!(identifier.to_string(), "(x)->(20,0)|37");

        let separator = PifRecord::new(";", None, 18, TokenCategory::Separator);
        assert_eq!(separator.to_string(), "(;)->(-1,-1)|18");
    }

    #[test]
    fn test_whitespace_display_names() {
        assert_eq!(display_name(" "), "SPACE");
        assert_eq!(display_name("\t"), "TAB");
        assert_eq!(display_name("\n"), "NEW_LINE");
        assert_eq!(display_name("if"), "if");

        let newline = PifRecord::new("\n", None, 21, TokenCategory::Separator);
        assert_eq!(newline.to_string(), "(NEW_LINE)->(-1,-1)|21");
    }

    #[test]
    fn test_pif_collection() {
        let mut pif = ProgramInternalForm::new();
        pif.push(PifRecord::new("int", None, 23, TokenCategory::ReservedWord));
        pif.push(PifRecord::new(" ", None, 20, TokenCategory::Separator));

        assert_eq!(pif.len(), 2);
        assert_eq!(pif.count(TokenCategory::Separator), 1);
        assert_eq!(pif.to_string(), "(int)->(-1,-1)|23\n(SPACE)->(-1,-1)|20\n");
        assert_eq!((&pif).into_iter().count(), 2);
    }
}
