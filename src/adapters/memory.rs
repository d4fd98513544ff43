//! In-memory adapters for tests and embedding.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::dataset::Dataset;
use crate::error::DatasetError;
use crate::ports::dataset::DatasetSource;
use crate::ports::filesystem::FileSystem;

/// A dataset that is already in memory.
pub struct StaticDatasetSource {
    dataset: Arc<Dataset>,
}

impl StaticDatasetSource {
    /// Wraps an already built dataset.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset: Arc::new(dataset) }
    }
}

impl DatasetSource for StaticDatasetSource {
    fn load_dataset(&self) -> Result<Arc<Dataset>, DatasetError> {
        Ok(Arc::clone(&self.dataset))
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

/// A filesystem held in a map, keyed by path.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the contents written to `path`, if any.
    #[must_use]
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner).get(path).cloned()
    }

    /// All paths written so far, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> =
            self.files.lock().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.contents(path).ok_or_else(|| format!("no such file: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap_or_else(PoisonError::into_inner).contains_key(path)
    }
}
