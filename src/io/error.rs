//! Error types for the reader pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised anywhere in a reader pipeline
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Input text was malformed or did not fit the target shape
    #[error("Failed to deserialize {shape}: {source}")]
    Deserialization {
        /// Name of the target shape
        shape: &'static str,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be rendered as text
    #[error("Failed to serialize {shape}: {source}")]
    Serialization {
        /// Name of the source shape
        shape: &'static str,
        /// Underlying serializer error
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing a file location failed
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        /// The location that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ReaderError {
    /// Whether the error stems from malformed input
    pub fn is_deserialization(&self) -> bool {
        matches!(self, ReaderError::Deserialization { .. })
    }

    /// Whether the error stems from the file system
    pub fn is_io(&self) -> bool {
        matches!(self, ReaderError::Io { .. })
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            ReaderError::Deserialization { .. } => "Deserialization",
            ReaderError::Serialization { .. } => "Serialization",
            ReaderError::Io { .. } => "IO",
        }
    }
}

/// Result type for reader operations
pub type ReaderResult<T> = Result<T, ReaderError>;
