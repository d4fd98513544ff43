//! Adapter implementations of the port traits.

pub mod live;
mod memo;
mod memory;

pub use memo::MemoizingDatasetSource;
pub use memory::{MemoryFileSystem, StaticDatasetSource};
