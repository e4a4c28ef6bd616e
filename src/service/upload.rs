//! Staging of streamed input
//!
//! A document arriving on a stream (typically standard input) is copied into a
//! temporary file first, then read back through the regular file path of the
//! reader pipeline. The file is removed when the [`StagedUpload`] is dropped.

use crate::service::error::{ServiceError, ServiceResult};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A stream copied into a temporary file
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
    bytes: u64,
}

impl StagedUpload {
    /// Copy everything from `source` into a fresh temporary file
    pub fn stage<S: Read>(mut source: S) -> ServiceResult<Self> {
        let staging_error = |path: &Path, source: io::Error| ServiceError::Staging {
            path: path.to_path_buf(),
            source,
        };

        let mut file = NamedTempFile::new()
            .map_err(|source| ServiceError::Staging { path: PathBuf::from("-"), source })?;
        let bytes = io::copy(&mut source, &mut file).map_err(|e| staging_error(file.path(), e))?;
        file.flush().map_err(|e| staging_error(file.path(), e))?;

        debug!(path = %file.path().display(), bytes, "Staged input");
        Ok(Self { file, bytes })
    }

    /// Copy standard input into a temporary file
    pub fn stage_stdin() -> ServiceResult<Self> {
        Self::stage(io::stdin().lock())
    }

    /// Location of the staged copy
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of bytes staged
    pub fn len(&self) -> u64 {
        self.bytes
    }

    /// Whether the stream was empty
    pub fn is_empty(&self) -> bool {
        self.bytes == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_stage_copies_stream() {
        let upload = StagedUpload::stage(&b"{\"building\":{}}"[..]).unwrap();

        assert_eq!(upload.len(), 15);
        assert!(!upload.is_empty());
        assert_eq!(fs::read_to_string(upload.path()).unwrap(), "{\"building\":{}}");
    }

    #[test]
    fn test_staged_file_removed_on_drop() {
        let upload = StagedUpload::stage(io::empty()).unwrap();
        let path = upload.path().to_path_buf();

        assert!(upload.is_empty());
        assert!(path.exists());
        drop(upload);
        assert!(!path.exists());
    }
}
