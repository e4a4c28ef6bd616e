//! Base reader: JSON text via serde_json
//!
//! File writes are atomic: the text goes to a fresh temporary file next to the
//! destination, is flushed to disk, and only then renamed over the target.
//! A failed write never leaves a truncated document behind.

use crate::io::error::{ReaderError, ReaderResult};
use crate::io::reader::{DocumentShape, Reader};
use crate::types::OutputStyle;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The concrete component every pipeline ends in
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader {
    style: OutputStyle,
}

impl JsonReader {
    /// Compact output
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output style
    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// Indented output
    pub fn pretty() -> Self {
        Self::new().with_style(OutputStyle::Pretty)
    }

    /// The configured output style
    pub fn style(&self) -> OutputStyle {
        self.style
    }
}

impl Reader for JsonReader {
    fn read<T>(&self, input: &str) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape,
    {
        serde_json::from_str(input)
            .map_err(|source| ReaderError::Deserialization { shape: T::shape_name(), source })
    }

    fn read_slice<T>(&self, input: &[u8]) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape,
    {
        serde_json::from_slice(input)
            .map_err(|source| ReaderError::Deserialization { shape: T::shape_name(), source })
    }

    fn read_from_file<T>(&self, path: &Path) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape,
    {
        let bytes =
            fs::read(path).map_err(|source| ReaderError::Io { path: path.to_path_buf(), source })?;
        self.read_slice(&bytes)
    }

    fn write<T>(&self, value: &T) -> ReaderResult<String>
    where
        T: Serialize + DocumentShape,
    {
        let text = match self.style {
            OutputStyle::Compact => serde_json::to_string(value),
            OutputStyle::Pretty => serde_json::to_string_pretty(value),
        };
        text.map_err(|source| ReaderError::Serialization { shape: T::shape_name(), source })
    }

    fn write_to_file<T>(&self, value: &T, path: &Path) -> ReaderResult<()>
    where
        T: Serialize + DocumentShape,
    {
        let text = self.write(value)?;
        write_atomic(path, text.as_bytes())
    }
}

/// Write `contents` to a temporary sibling of `path`, then rename it into place
pub fn write_atomic(path: &Path, contents: &[u8]) -> ReaderResult<()> {
    let io_error = |source: io::Error| ReaderError::Io { path: path.to_path_buf(), source };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(parent).map_err(io_error)?;
    staged.write_all(contents).map_err(io_error)?;
    staged.flush().map_err(io_error)?;
    staged.as_file().sync_all().map_err(io_error)?;
    staged.persist(path).map_err(|err| io_error(err.error))?;

    Ok(())
}
