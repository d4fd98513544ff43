//! Dataset port: where the parameter dataset comes from.

use std::sync::Arc;

use crate::dataset::Dataset;
use crate::error::DatasetError;

/// Loads the parameter dataset.
///
/// Implementations decide where the data lives (disk, HTTP, memory).
/// Caching is a separate concern, added by wrapping a source in
/// [`MemoizingDatasetSource`](crate::adapters::MemoizingDatasetSource).
pub trait DatasetSource: Send + Sync {
    /// Loads (or returns a shared handle to) the dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be read, fetched, or decoded.
    fn load_dataset(&self) -> Result<Arc<Dataset>, DatasetError>;

    /// Human-readable location, used in log lines and error messages.
    fn describe(&self) -> String;
}
