//! Lexical analysis: the scanner and its constant recognizers

pub mod constants;
pub mod error;
pub mod scanner;

pub use constants::{ConstantKind, ConstantPatterns};
pub use error::{LexicalError, ScannerSetupError};
pub use scanner::{ScanStatistics, Scanner};
