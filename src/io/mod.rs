//! Reading and writing building documents
//!
//! # Overview
//!
//! - **Reader**: parse and format documents as text or files
//! - **JsonReader**: the concrete JSON component, compact or pretty
//! - **LoggingReader**: decorator logging every call
//! - **AuditingReader**: decorator recording every call in an [`AuditLog`]
//!
//! Decorators own their inner reader, so any number of them nest around a
//! [`JsonReader`] and the result behaves exactly like the bare component.
//!
//! # Usage Example
//!
//! ```rust
//! use building_metrics::facility::BuildingDocument;
//! use building_metrics::io::*;
//!
//! let log = AuditLog::new();
//! let reader = LoggingReader::new(AuditingReader::new(JsonReader::new(), log.clone()));
//!
//! let document: BuildingDocument = reader.read(r#"{"building":{"id":"B1"}}"#)?;
//! assert_eq!(reader.write(&document)?, r#"{"building":{"id":"B1"}}"#);
//! assert_eq!(log.len(), 2);
//! # Ok::<(), ReaderError>(())
//! ```

pub mod audit;
pub mod error;
pub mod json;
pub mod logging_reader;
pub mod reader;

// Re-export all public types for convenience
pub use audit::{AuditEntry, AuditLog, AuditOperation, AuditingReader};
pub use error::{ReaderError, ReaderResult};
pub use json::{write_atomic, JsonReader};
pub use logging_reader::LoggingReader;
pub use reader::{DocumentShape, Reader};

use crate::facility::BuildingDocument;

/// Parse a building document with a plain [`JsonReader`]
pub fn parse(input: &[u8]) -> ReaderResult<BuildingDocument> {
    JsonReader::new().read_slice(input)
}

/// Format a building document compactly with a plain [`JsonReader`]
pub fn format(document: &BuildingDocument) -> ReaderResult<String> {
    JsonReader::new().write(document)
}
