//! Shared primitive types and helpers used by the automaton, scanner and pipeline.

pub mod span;
pub mod text;

pub use span::{Position, Span};
pub use text::{remove_char, tokenize};
