use crate::validator::ValidationResult;
use crate::writer::WriteLogEntry;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("metadata validation failed: {} blocking error(s)", .0.errors.len())]
    ValidationFailed(ValidationResult),

    #[error("tag tool error [{code}]: {message}")]
    TagToolFailed { code: String, message: String },

    /// The physical write failed after mapping. Carries the fields that were
    /// mapped and the step trail accumulated up to the failure, so a caller
    /// can report what was attempted.
    #[error("write aborted [{code}]: {message}")]
    WriteAborted {
        code: String,
        message: String,
        fields_mapped: Vec<String>,
        logs: Vec<WriteLogEntry>,
    },

    #[error("tag session unavailable: {0}")]
    SessionUnavailable(String),

    #[error("sidecar envelope exceeds {limit} bytes ({actual})")]
    EnvelopeOverflow { limit: usize, actual: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
