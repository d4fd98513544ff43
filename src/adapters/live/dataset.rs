//! Live dataset sources: a JSON file on disk or a URL.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;

use crate::dataset::Dataset;
use crate::error::DatasetError;
use crate::ports::dataset::DatasetSource;
use crate::ports::filesystem::FileSystem;

/// Reads the dataset from a file through the [`FileSystem`] port.
pub struct FileDatasetSource {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileDatasetSource {
    /// Creates a source for `path`.
    #[must_use]
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self { fs, path: path.into() }
    }
}

impl DatasetSource for FileDatasetSource {
    fn load_dataset(&self) -> Result<Arc<Dataset>, DatasetError> {
        let location = self.describe();
        let text = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| DatasetError::Read { location: location.clone(), message: e.to_string() })?;
        tracing::debug!(path = %location, bytes = text.len(), "read dataset file");
        Dataset::from_json(&location, &text).map(Arc::new)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the dataset over HTTP(S).
///
/// The request runs on a private current-thread runtime so callers stay
/// synchronous.
pub struct HttpDatasetSource {
    client: Client,
    url: String,
}

impl HttpDatasetSource {
    /// Creates a source for `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: Client::new(), url: url.into() }
    }

    async fn fetch(&self) -> Result<String, DatasetError> {
        let fetch_error = |e: reqwest::Error| DatasetError::Fetch {
            url: self.url.clone(),
            message: e.to_string(),
        };
        let response =
            self.client.get(&self.url).send().await.map_err(fetch_error)?.error_for_status();
        response.map_err(fetch_error)?.text().await.map_err(fetch_error)
    }
}

impl DatasetSource for HttpDatasetSource {
    fn load_dataset(&self) -> Result<Arc<Dataset>, DatasetError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DatasetError::Fetch { url: self.url.clone(), message: e.to_string() })?;
        let text = runtime.block_on(self.fetch())?;
        tracing::debug!(url = %self.url, bytes = text.len(), "fetched dataset");
        Dataset::from_json(&self.url, &text).map(Arc::new)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveFileSystem;
    use crate::dataset::tests::sample_json;

    #[test]
    fn file_source_parses_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix_data.json");
        std::fs::write(&path, sample_json()).unwrap();

        let source = FileDatasetSource::new(Arc::new(LiveFileSystem), &path);
        let dataset = source.load_dataset().unwrap();
        assert!(dataset.makes().contains(&"Hyundai".to_string()));
    }

    #[test]
    fn file_source_reports_location_on_failure() {
        let source = FileDatasetSource::new(Arc::new(LiveFileSystem), "/nonexistent/matrix.json");
        let err = source.load_dataset().unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/matrix.json"));
    }

    #[test]
    fn http_source_reports_unreachable_host() {
        let source = HttpDatasetSource::new("http://127.0.0.1:9/matrix_data.json");
        let err = source.load_dataset().unwrap_err();
        assert!(matches!(err, DatasetError::Fetch { .. }));
    }
}
