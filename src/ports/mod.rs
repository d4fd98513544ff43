//! Port traits defining external boundaries.
//!
//! The comparison and transfer core never touches the outside world; these
//! traits are the only way data gets in (dataset) or out (artifact files).
//! Implementations live in `src/adapters/`.

pub mod dataset;
pub mod filesystem;

pub use dataset::DatasetSource;
pub use filesystem::FileSystem;
