//! The reader component interface
//!
//! A [`Reader`] parses and formats documents, from and to text or files.
//! Decorators implement the same trait around an owned inner reader and add
//! a side effect before and/or after delegating, so pipelines compose by
//! plain nesting: `LoggingReader::new(AuditingReader::new(JsonReader::new(), log))`.

use crate::facility::BuildingDocument;
use crate::io::error::ReaderResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A value the pipeline can read or write, with a short name for log lines
pub trait DocumentShape: fmt::Debug {
    /// Short, human-readable name of the shape
    fn shape_name() -> &'static str;
}

impl DocumentShape for BuildingDocument {
    fn shape_name() -> &'static str {
        "BuildingDocument"
    }
}

/// Read and write documents as structured text
pub trait Reader {
    /// Parse `input` into a `T`
    fn read<T>(&self, input: &str) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape;

    /// Parse raw bytes into a `T`; invalid UTF-8 is a deserialization error
    fn read_slice<T>(&self, input: &[u8]) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape;

    /// Read the file at `path` and parse it into a `T`
    fn read_from_file<T>(&self, path: &Path) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape;

    /// Render `value` as text
    fn write<T>(&self, value: &T) -> ReaderResult<String>
    where
        T: Serialize + DocumentShape;

    /// Render `value` and store it at `path`
    fn write_to_file<T>(&self, value: &T, path: &Path) -> ReaderResult<()>
    where
        T: Serialize + DocumentShape;
}
