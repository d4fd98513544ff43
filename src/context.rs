//! Service context bundling the port trait objects and configuration.

use std::sync::Arc;

use crate::adapters::live::{FileDatasetSource, HttpDatasetSource, LiveFileSystem};
use crate::adapters::MemoizingDatasetSource;
use crate::config::{DatasetLocation, ExplorerConfig};
use crate::ports::dataset::DatasetSource;
use crate::ports::filesystem::FileSystem;

/// Everything a command handler needs from the outside world.
pub struct ServiceContext {
    /// Filesystem for artifact output.
    pub fs: Arc<dyn FileSystem>,
    /// Source of the parameter dataset.
    pub dataset: Box<dyn DatasetSource>,
    /// Effective configuration.
    pub config: ExplorerConfig,
}

impl ServiceContext {
    /// Creates a live context: real disk, and the dataset from the configured
    /// file or URL, loaded at most once.
    #[must_use]
    pub fn live(config: ExplorerConfig) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(LiveFileSystem);
        let dataset: Box<dyn DatasetSource> = match config.dataset_location() {
            DatasetLocation::File(path) => Box::new(MemoizingDatasetSource::new(
                FileDatasetSource::new(Arc::clone(&fs), path),
            )),
            DatasetLocation::Url(url) => {
                Box::new(MemoizingDatasetSource::new(HttpDatasetSource::new(url)))
            }
        };
        Self { fs, dataset, config }
    }

    /// Creates a context from explicit parts.
    #[must_use]
    pub fn new(
        fs: Arc<dyn FileSystem>,
        dataset: Box<dyn DatasetSource>,
        config: ExplorerConfig,
    ) -> Self {
        Self { fs, dataset, config }
    }
}
