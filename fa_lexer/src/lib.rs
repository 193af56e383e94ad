// Internal modules
pub mod automaton;
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod symbols;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use automaton::{AutomatonError, FiniteAutomaton};
pub use lexical::{LexicalError, Scanner, ScannerSetupError};
pub use pipeline::{scan_program, PipelineError, ScanOutput, ScanRequest};
pub use symbols::{SymbolPosition, SymbolTable};
pub use tokens::{PifRecord, ProgramInternalForm, TokenCategory, TokenVocabulary};
pub use utils::{remove_char, tokenize};
