//! Caching decorator for dataset sources.

use std::sync::{Arc, Mutex, PoisonError};

use crate::dataset::Dataset;
use crate::error::DatasetError;
use crate::ports::dataset::DatasetSource;

/// Wraps a [`DatasetSource`] and keeps the first successful load.
///
/// Failed loads are not cached, so a later call retries the inner source.
/// The cache lives as long as the decorator.
pub struct MemoizingDatasetSource<S> {
    inner: S,
    cached: Mutex<Option<Arc<Dataset>>>,
}

impl<S: DatasetSource> MemoizingDatasetSource<S> {
    /// Wraps `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner, cached: Mutex::new(None) }
    }
}

impl<S: DatasetSource> DatasetSource for MemoizingDatasetSource<S> {
    fn load_dataset(&self) -> Result<Arc<Dataset>, DatasetError> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(dataset) = cached.as_ref() {
            return Ok(Arc::clone(dataset));
        }
        let dataset = self.inner.load_dataset()?;
        tracing::debug!(source = %self.inner.describe(), "cached dataset");
        *cached = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}
