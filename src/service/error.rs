//! Error types for request handling

use crate::io::ReaderError;
use crate::types::Operation;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while handling a request
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The reader pipeline failed
    #[error("Reader error: {0}")]
    Reader(#[from] ReaderError),

    /// The document has no building to operate on
    #[error("Document does not contain a building")]
    MissingBuilding,

    /// No level carries the requested id
    #[error("Level {level_id} not found")]
    LevelNotFound {
        /// Requested level id
        level_id: String,
    },

    /// The level exists but none of its rooms carries the requested id
    #[error("Room {room_id} not found on level {level_id}")]
    RoomNotFound {
        /// Requested level id
        level_id: String,
        /// Requested room id
        room_id: String,
    },

    /// A room id was given without its level
    #[error("Parameter 'level_id' is required when 'room_id' ({room_id}) is provided")]
    MissingLevelId {
        /// Requested room id
        room_id: String,
    },

    /// The operation persists a document but no location was given
    #[error("Operation {0} requires an output path")]
    MissingOutput(Operation),

    /// Staging the standard input stream failed
    #[error("Failed to stage input at {}: {source}", path.display())]
    Staging {
        /// Location of the staging file, or `-` when none was created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    /// Create a level-not-found error
    pub fn level_not_found(level_id: impl Into<String>) -> Self {
        Self::LevelNotFound { level_id: level_id.into() }
    }

    /// Create a room-not-found error
    pub fn room_not_found(level_id: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self::RoomNotFound { level_id: level_id.into(), room_id: room_id.into() }
    }

    /// Whether the caller sent a bad request, as opposed to an I/O or
    /// serialization failure on our side
    pub fn is_client_error(&self) -> bool {
        match self {
            ServiceError::Reader(e) => e.is_deserialization(),
            ServiceError::MissingBuilding
            | ServiceError::LevelNotFound { .. }
            | ServiceError::RoomNotFound { .. }
            | ServiceError::MissingLevelId { .. }
            | ServiceError::MissingOutput(_) => true,
            ServiceError::Staging { .. } => false,
        }
    }

    /// Whether the error means a requested node does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::LevelNotFound { .. } | ServiceError::RoomNotFound { .. })
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            ServiceError::Reader(e) => e.category(),
            ServiceError::MissingBuilding => "MissingBuilding",
            ServiceError::LevelNotFound { .. } | ServiceError::RoomNotFound { .. } => "NotFound",
            ServiceError::MissingLevelId { .. } | ServiceError::MissingOutput(_) => "BadRequest",
            ServiceError::Staging { .. } => "IO",
        }
    }

    /// Log the error at a level matching its category
    pub fn log(&self) {
        if self.is_client_error() {
            debug!(category = self.category(), "Request rejected: {}", self);
        } else {
            warn!(category = self.category(), "Request failed: {}", self);
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
