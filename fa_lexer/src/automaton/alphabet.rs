//! Alphabet classes: aliased sets of literal characters
//!
//! A class spec such as `[a.z|A.Z]` is a `|`-separated list of atoms. An atom
//! is either literal characters or an inclusive `a.b` range. Every atom becomes
//! its own class under the shared alias, in declaration order.

use super::error::AutomatonError;
use crate::config::compile_time::automaton::MAX_RANGE_SPAN;
use crate::utils::{remove_char, tokenize};
use std::fmt;

/// Expanded characters of one atom together with its alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetClass {
    characters: Vec<char>,
    alias: String,
}

impl AlphabetClass {
    pub fn new(characters: Vec<char>, alias: impl Into<String>) -> Self {
        Self {
            characters,
            alias: alias.into(),
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn characters(&self) -> &[char] {
        &self.characters
    }

    pub fn contains(&self, ch: char) -> bool {
        self.characters.contains(&ch)
    }

    /// The expanded characters as one string
    pub fn expanded(&self) -> String {
        self.characters.iter().collect()
    }
}

impl fmt::Display for AlphabetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (alias: {})", self.expanded(), self.alias)
    }
}

/// Ordered collection of classes; the first class containing a character wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    classes: Vec<AlphabetClass>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class unless one with the same expanded characters exists.
    /// Returns false when the class was ignored.
    pub fn push(&mut self, class: AlphabetClass) -> bool {
        if self
            .classes
            .iter()
            .any(|existing| existing.characters == class.characters)
        {
            return false;
        }
        self.classes.push(class);
        true
    }

    /// Alias of the first class containing `ch`
    pub fn classify(&self, ch: char) -> Option<&str> {
        self.classes
            .iter()
            .find(|class| class.contains(ch))
            .map(AlphabetClass::alias)
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.classes.iter().any(|class| class.alias == alias)
    }

    pub fn classes(&self) -> &[AlphabetClass] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Expand one atom into its characters.
///
/// `line` is the 1-based rule-file line used in errors.
pub fn expand_atom(atom: &str, line: usize) -> Result<Vec<char>, AutomatonError> {
    let parts = tokenize(atom, '.');

    match parts.as_slice() {
        [] => Err(AutomatonError::EmptyAtom { line }),
        [_] => Ok(atom.chars().collect()),
        [low, high] => {
            let (Some(low), Some(high)) = (single_char(low), single_char(high)) else {
                return Err(AutomatonError::InvalidRangeBound {
                    line,
                    atom: atom.to_string(),
                });
            };

            if low > high {
                return Err(AutomatonError::ReversedRange {
                    line,
                    atom: atom.to_string(),
                });
            }

            let span = high as u32 - low as u32 + 1;
            if span > MAX_RANGE_SPAN {
                return Err(AutomatonError::RangeTooWide {
                    line,
                    atom: atom.to_string(),
                    span,
                });
            }

            Ok((low..=high).collect())
        }
        _ => Err(AutomatonError::TooManyRangeParts {
            line,
            atom: atom.to_string(),
        }),
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Parse a bracketed class spec into one class per atom
pub fn parse_class_spec(
    spec: &str,
    alias: &str,
    line: usize,
) -> Result<Vec<AlphabetClass>, AutomatonError> {
    let unbracketed = remove_char(&remove_char(spec, '['), ']');

    tokenize(&unbracketed, '|')
        .iter()
        .map(|atom| expand_atom(atom, line).map(|chars| AlphabetClass::new(chars, alias)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_digit_range_expansion() {
        let chars = expand_atom("0.9", 1).unwrap();
        assert_eq!(chars, "0123456789".chars().collect::<Vec<_>>());
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(expand_atom("a.a", 1).unwrap(), vec!['a']);
    }

    #[test]
    fn test_literal_atoms() {
        assert_eq!(expand_atom("_", 1).unwrap(), vec!['_']);
        assert_eq!(expand_atom("+-", 1).unwrap(), vec!['+', '-']);
        // A lone dot splits into a single empty piece and stays literal
        assert_eq!(expand_atom(".", 1).unwrap(), vec!['.']);
    }

    #[test]
    fn test_invalid_atoms() {
        assert_matches!(
            expand_atom("ab.z", 3),
            Err(AutomatonError::InvalidRangeBound { line: 3, .. })
        );
        assert_matches!(
            expand_atom(".a", 1),
            Err(AutomatonError::InvalidRangeBound { .. })
        );
        assert_matches!(
            expand_atom("a.b.c", 1),
            Err(AutomatonError::TooManyRangeParts { .. })
        );
        assert_matches!(
            expand_atom("z.a", 1),
            Err(AutomatonError::ReversedRange { .. })
        );
        assert_matches!(expand_atom("", 4), Err(AutomatonError::EmptyAtom { line: 4 }));
    }

    #[test]
    fn test_range_span_limit() {
        let high = char::from_u32('a' as u32 + MAX_RANGE_SPAN).unwrap_or(char::MAX);
        let atom = format!("a.{}", high);
        assert_matches!(
            expand_atom(&atom, 1),
            Err(AutomatonError::RangeTooWide { .. })
        );
    }

    #[test]
    fn test_class_spec_alternation() {
        let classes = parse_class_spec("[a.c|X.Z]", "letter", 1).unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].expanded(), "abc");
        assert_eq!(classes[1].expanded(), "XYZ");
        assert!(classes.iter().all(|c| c.alias() == "letter"));
    }

    #[test]
    fn test_first_declared_class_wins() {
        let mut alphabet = Alphabet::new();
        assert!(alphabet.push(AlphabetClass::new("0123".chars().collect(), "low")));
        assert!(alphabet.push(AlphabetClass::new("0123456789".chars().collect(), "digit")));
        assert!(!alphabet.push(AlphabetClass::new("0123".chars().collect(), "other")));

        assert_eq!(alphabet.classify('2'), Some("low"));
        assert_eq!(alphabet.classify('7'), Some("digit"));
        assert_eq!(alphabet.classify('x'), None);
        assert!(!alphabet.has_alias("other"));
        assert_eq!(alphabet.len(), 2);
    }

    #[test]
    fn test_class_display() {
        let class = AlphabetClass::new(vec!['0', '1'], "bit");
        assert_eq!(class.to_string(), "01 (alias: bit)");
    }
}
