//! Token vocabulary and the Program Internal Form

pub mod pif;
pub mod vocabulary;

pub use pif::{display_name, PifRecord, ProgramInternalForm};
pub use vocabulary::{
    TokenCategory, TokenVocabulary, VocabularyEntry, VocabularyError, CONSTANT_CODE,
    IDENTIFIER_CODE,
};
