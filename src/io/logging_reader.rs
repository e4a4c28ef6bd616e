//! Decorator that logs every call around its inner reader

use crate::io::error::ReaderResult;
use crate::io::reader::{DocumentShape, Reader};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Logs before and after delegating to `R`; results pass through untouched
#[derive(Debug, Clone, Default)]
pub struct LoggingReader<R> {
    inner: R,
}

impl<R: Reader> LoggingReader<R> {
    /// Wrap `inner`
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// The wrapped reader
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

fn log_outcome<T>(operation: &'static str, shape: &'static str, result: &ReaderResult<T>) {
    match result {
        Ok(_) => info!(operation, shape, "Reader call succeeded"),
        Err(e) => warn!(operation, shape, category = e.category(), "Reader call failed: {}", e),
    }
}

impl<R: Reader> Reader for LoggingReader<R> {
    fn read<T>(&self, input: &str) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape,
    {
        let shape = T::shape_name();
        info!(operation = "read", shape, bytes = input.len(), "Reading {} from text", shape);
        debug!("Input: {}", input);

        let result = self.inner.read::<T>(input);
        log_outcome("read", shape, &result);
        if let Ok(value) = &result {
            debug!("Parsed: {:?}", value);
        }
        result
    }

    fn read_slice<T>(&self, input: &[u8]) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape,
    {
        let shape = T::shape_name();
        info!(operation = "read_slice", shape, bytes = input.len(), "Reading {} from bytes", shape);
        debug!("Input: {}", String::from_utf8_lossy(input));

        let result = self.inner.read_slice::<T>(input);
        log_outcome("read_slice", shape, &result);
        if let Ok(value) = &result {
            debug!("Parsed: {:?}", value);
        }
        result
    }

    fn read_from_file<T>(&self, path: &Path) -> ReaderResult<T>
    where
        T: DeserializeOwned + DocumentShape,
    {
        let shape = T::shape_name();
        info!(
            operation = "read_from_file",
            shape,
            path = %path.display(),
            "Reading {} from file",
            shape
        );

        let result = self.inner.read_from_file::<T>(path);
        log_outcome("read_from_file", shape, &result);
        if let Ok(value) = &result {
            debug!("Parsed: {:?}", value);
        }
        result
    }

    fn write<T>(&self, value: &T) -> ReaderResult<String>
    where
        T: Serialize + DocumentShape,
    {
        let shape = T::shape_name();
        info!(operation = "write", shape, "Writing {} to text", shape);
        debug!("Value: {:?}", value);

        let result = self.inner.write(value);
        log_outcome("write", shape, &result);
        if let Ok(text) = &result {
            debug!("Output: {}", text);
        }
        result
    }

    fn write_to_file<T>(&self, value: &T, path: &Path) -> ReaderResult<()>
    where
        T: Serialize + DocumentShape,
    {
        let shape = T::shape_name();
        info!(
            operation = "write_to_file",
            shape,
            path = %path.display(),
            "Writing {} to file",
            shape
        );
        debug!("Value: {:?}", value);

        let result = self.inner.write_to_file(value, path);
        log_outcome("write_to_file", shape, &result);
        result
    }
}
