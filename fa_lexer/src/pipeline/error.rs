use crate::file_processor::FileProcessorError;
use crate::lexical::{LexicalError, ScannerSetupError};
use crate::logging::codes;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Scanner setup failed: {0}")]
    Setup(#[from] ScannerSetupError),

    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("{0}")]
    Lexical(#[from] LexicalError),

    #[error("Cannot write {path}: {message}")]
    Output { path: String, message: String },

    #[error("Cannot serialize scan report: {message}")]
    Serialization { message: String },
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::Setup(e) => e.error_code(),
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::Lexical(e) => e.error_code(),
            PipelineError::Output { .. } => codes::output::WRITE_FAILED,
            PipelineError::Serialization { .. } => codes::output::SERIALIZATION_FAILED,
        }
    }

    /// The lexical error, when the scan itself failed
    pub fn as_lexical(&self) -> Option<&LexicalError> {
        match self {
            PipelineError::Lexical(e) => Some(e),
            _ => None,
        }
    }
}
