//! Explorer configuration.
//!
//! Values are layered, later layers winning:
//! built-in defaults, the YAML file (`obd-compare.yaml` or `--config`),
//! environment variables (a `.env` file is honoured), and `--dataset`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compare::MIN_VEHICLES;
use crate::ports::filesystem::FileSystem;
use crate::transfer::DEFAULT_FREQ;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "obd-compare.yaml";

/// Environment variable overriding the dataset location.
pub const DATASET_ENV: &str = "OBD_COMPARE_DATASET";

/// Environment variable overriding the comparison size limit.
pub const MAX_VEHICLES_ENV: &str = "OBD_COMPARE_MAX_VEHICLES";

/// Dataset location used when nothing else is configured.
pub const DEFAULT_DATASET: &str = "public/data/matrix_data.json";

/// Largest comparison allowed by default.
pub const DEFAULT_MAX_VEHICLES: usize = 4;

/// Settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Dataset file path or `http(s)://` URL.
    pub dataset: String,
    /// Most vehicles a comparison may hold.
    pub max_vehicles: usize,
    /// `freq` given to commands that have none.
    pub default_freq: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET.to_string(),
            max_vehicles: DEFAULT_MAX_VEHICLES,
            default_freq: DEFAULT_FREQ,
        }
    }
}

/// Where the dataset should be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLocation {
    /// A local file.
    File(PathBuf),
    /// An HTTP(S) URL.
    Url(String),
}

impl ExplorerConfig {
    /// Parses a YAML config document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error string if the YAML is malformed.
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        serde_yaml::from_str(text).map_err(|e| format!("Failed to parse config: {e}"))
    }

    /// Loads the config file layer.
    ///
    /// An explicit path must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error string if the file cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(CONFIG_FILE_NAME);
                if !fs.exists(&default) {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&text).map_err(|e| format!("{e} ({})", path.display()))
    }

    /// Applies environment overrides from the process environment, after
    /// loading `.env` if present.
    #[must_use]
    pub fn apply_env(self) -> Self {
        let _ = dotenvy::dotenv();
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides using `lookup`. Unparseable values are
    /// ignored with a warning.
    #[must_use]
    pub fn apply_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dataset) = lookup(DATASET_ENV).filter(|v| !v.trim().is_empty()) {
            self.dataset = dataset;
        }
        if let Some(raw) = lookup(MAX_VEHICLES_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(max) => self.max_vehicles = max,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid {MAX_VEHICLES_ENV}"),
            }
        }
        self
    }

    /// Applies the `--dataset` flag.
    #[must_use]
    pub fn with_dataset(mut self, dataset: Option<&str>) -> Self {
        if let Some(dataset) = dataset {
            self.dataset = dataset.to_string();
        }
        self
    }

    /// Checks the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns an error string if `max_vehicles` is below the minimum
    /// comparison size or `default_freq` is not a positive number.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_vehicles < MIN_VEHICLES {
            return Err(format!(
                "max_vehicles must be at least {MIN_VEHICLES}, got {}",
                self.max_vehicles
            ));
        }
        if !(self.default_freq.is_finite() && self.default_freq > 0.0) {
            return Err(format!("default_freq must be positive, got {}", self.default_freq));
        }
        Ok(())
    }

    /// Builds the effective configuration from every layer.
    ///
    /// # Errors
    ///
    /// Returns an error string if the config file is unreadable or the
    /// result fails [`validate`](Self::validate).
    pub fn resolve(
        fs: &dyn FileSystem,
        config_path: Option<&Path>,
        dataset_flag: Option<&str>,
    ) -> Result<Self, String> {
        let config = Self::load(fs, config_path)?.apply_env().with_dataset(dataset_flag);
        config.validate()?;
        Ok(config)
    }

    /// Interprets [`dataset`](Self::dataset) as a file path or URL.
    #[must_use]
    pub fn dataset_location(&self) -> DatasetLocation {
        let lower = self.dataset.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DatasetLocation::Url(self.dataset.clone())
        } else {
            DatasetLocation::File(PathBuf::from(&self.dataset))
        }
    }
}
