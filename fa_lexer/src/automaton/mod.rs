//! Finite automaton engine
//!
//! Builds acceptors from declarative rule files and answers membership
//! queries for the scanner's identifier and integer classes.

pub mod alphabet;
pub mod error;
pub mod loader;
pub mod machine;

pub use alphabet::{Alphabet, AlphabetClass};
pub use error::AutomatonError;
pub use loader::{load_rule_file, parse_rules};
pub use machine::{ConsistencyIssue, FiniteAutomaton, TransitionTable};

use std::path::Path;

impl FiniteAutomaton {
    /// Load an automaton from a rule file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AutomatonError> {
        load_rule_file(path.as_ref())
    }

    /// Build an automaton from rule-file text
    pub fn parse(text: &str) -> Result<Self, AutomatonError> {
        parse_rules(text)
    }
}

impl std::str::FromStr for FiniteAutomaton {
    type Err = AutomatonError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_rules(text)
    }
}
