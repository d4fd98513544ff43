//! Library error types.

use thiserror::Error;

/// Failures while loading or decoding the parameter dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset {location}: {message}")]
    Read {
        /// Path or URL that was read.
        location: String,
        /// Underlying error text.
        message: String,
    },

    /// The dataset was read but is not the expected JSON shape.
    #[error("failed to parse dataset {location}: {source}")]
    Parse {
        /// Path or URL that was parsed.
        location: String,
        /// JSON decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP request for the dataset failed.
    #[error("failed to fetch dataset {url}: {message}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Underlying error text.
        message: String,
    },
}

/// Failures while setting up a comparison.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompareError {
    /// Fewer than two known vehicles were requested.
    #[error("a comparison needs at least 2 known vehicles, got {0}")]
    TooFewVehicles(usize),

    /// More vehicles than the configured limit were requested.
    #[error("a comparison supports at most {max} vehicles, got {requested}")]
    TooManyVehicles {
        /// Configured limit.
        max: usize,
        /// Number requested.
        requested: usize,
    },

    /// The vehicle list and the parameter lists have different lengths.
    #[error("{vehicles} vehicles but {lists} parameter lists")]
    ParameterListMismatch {
        /// Number of vehicles.
        vehicles: usize,
        /// Number of parameter lists.
        lists: usize,
    },

    /// A transfer target is not part of the comparison.
    #[error("vehicle {0} is not part of this comparison")]
    NotInComparison(String),
}
