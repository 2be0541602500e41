//! Error types for corpus profiling

use thiserror::Error;

/// Errors raised while loading or profiling a corpus
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read corpus from {source_name}: {source}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corpus is not valid JSON: {0}")]
    MalformedCorpus(#[source] serde_json::Error),

    #[error("Unexpected corpus structure: {message}")]
    UnexpectedTopShape { message: String },

    /// A single record without a usable payload. Absorbed by the loader.
    #[error("Record {index} skipped: {reason}")]
    RecordShapeMismatch { index: usize, reason: String },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Error::UnexpectedTopShape {
            message: message.into(),
        }
    }

    /// Whether the run must stop. Record-level mismatches are not fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::RecordShapeMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
