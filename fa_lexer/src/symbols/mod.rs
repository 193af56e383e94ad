//! Symbol table for identifiers and constants found by the scanner

pub mod table;

pub use table::{SymbolPosition, SymbolTable};
