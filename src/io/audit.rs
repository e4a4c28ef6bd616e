//! Decorator that records an audit entry for every call
//!
//! Entries land in a shared [`AuditLog`]. Several auditing layers may share
//! one log; each layer appends its own entry, so a pipeline with `n` auditing
//! layers records `n` entries per call.
//!
//! An entry carries the text the call consumed or produced. File operations
//! read the file back after a successful inner call, so their byte count is
//! the size on disk.

use crate::io::error::ReaderResult;
use crate::io::reader::{DocumentShape, Reader};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

/// Which reader call produced an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOperation {
    /// Parse text
    Read,
    /// Parse raw bytes
    ReadSlice,
    /// Parse a file
    ReadFile,
    /// Render text
    Write,
    /// Render into a file
    WriteFile,
}

impl fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuditOperation::Read => "read",
            AuditOperation::ReadSlice => "read_slice",
            AuditOperation::ReadFile => "read_file",
            AuditOperation::Write => "write",
            AuditOperation::WriteFile => "write_file",
        };
        write!(f, "{}", name)
    }
}

/// One recorded reader call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    /// The call
    pub operation: AuditOperation,
    /// Shape read or written
    pub shape: &'static str,
    /// File location, for file operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Bytes consumed or produced; zero on failure
    pub bytes: usize,
    /// Text consumed or produced, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Whether the inner call succeeded
    pub succeeded: bool,
    /// When the call completed
    pub recorded_at: DateTime<Utc>,
}

/// Shared, append-only list of audit entries
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl AuditLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AuditEntry>> {
        // A panic while holding the lock cannot leave a half-pushed entry
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, entry: AuditEntry) {
        trace!(
            operation = %entry.operation,
            shape = entry.shape,
            bytes = entry.bytes,
            succeeded = entry.succeeded,
            "Audit entry recorded"
        );
        self.lock().push(entry);
    }

    /// Snapshot of all entries, oldest first
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.lock().clone()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing was recorded yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of entries for one operation
    pub fn count(&self, operation: AuditOperation) -> usize {
        self.lock().iter().filter(|entry| entry.operation == operation).count()
    }

    /// Number of failed calls
    pub fn failures(&self) -> usize {
        self.lock().iter().filter(|entry| !entry.succeeded).count()
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// Records an [`AuditEntry`] after each call to `R`
#[derive(Debug, Clone)]
pub struct AuditingReader<R> {
    inner: R,
    log: AuditLog,
}

impl<R: Reader> AuditingReader<R> {
    /// Wrap `inner`, appending to `log`
    pub fn new(inner: R, log: AuditLog) -> Self {
        Self { inner, log }
    }

    /// The log this layer appends to
    pub fn log(&self) -> &AuditLog {
        &self.log
    }

    /// The wrapped reader
    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn record<T>(
        &self,
        operation: AuditOperation,
        shape: &'static str,
        path: Option<&Path>,
        result: &ReaderResult<T>,
        content: Option<String>,
    ) {
        let succeeded = result.is_ok();
        let bytes = match &content {
            Some(text) if succeeded => text.len(),
            _ => 0,
        };
        self.log.record(AuditEntry {
            operation,
            shape,
            path: path.map(Path::to_path_buf),
            bytes,
            content,
            succeeded,
            recorded_at: Utc::now(),
        });
    }
}

/// Contents of `path` after a successful file call
fn file_content<T>(path: &Path, result: &ReaderResult<T>) -> Option<String> {
    result.as_ref().ok().and_then(|_| fs::read_to_string(path).ok())
}

impl<R: Reader> Reader for AuditingReader<R> {
    fn read<T>(&self, input: &str) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape,
    {
        let result = self.inner.read::<T>(input);
        let content = Some(input.to_string());
        self.record(AuditOperation::Read, T::shape_name(), None, &result, content);
        result
    }

    fn read_slice<T>(&self, input: &[u8]) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape,
    {
        let result = self.inner.read_slice::<T>(input);
        let content = Some(String::from_utf8_lossy(input).into_owned());
        self.record(AuditOperation::ReadSlice, T::shape_name(), None, &result, content);
        result
    }

    fn read_from_file<T>(&self, path: &Path) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape,
    {
        let result = self.inner.read_from_file::<T>(path);
        let content = file_content(path, &result);
        self.record(AuditOperation::ReadFile, T::shape_name(), Some(path), &result, content);
        result
    }

    fn write<T>(&self, value: &T) -> ReaderResult<String>
    where
        T: Serialize + DocumentShape,
    {
        let result = self.inner.write(value);
        let content = result.as_ref().ok().cloned();
        self.record(AuditOperation::Write, T::shape_name(), None, &result, content);
        result
    }

    fn write_to_file<T>(&self, value: &T, path: &Path) -> ReaderResult<()>
    where
        T: Serialize + DocumentShape,
    {
        let result = self.inner.write_to_file(value, path);
        let content = file_content(path, &result);
        self.record(AuditOperation::WriteFile, T::shape_name(), Some(path), &result, content);
        result
    }
}
