//! Live adapters for real external interactions.

pub mod dataset;
pub mod filesystem;

pub use dataset::{FileDatasetSource, HttpDatasetSource};
pub use filesystem::LiveFileSystem;
