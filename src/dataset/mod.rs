//! Dataset layer: the per-year document, where it comes from, and the
//! process-lifetime cache that holds it.

pub mod cache;
pub mod loader;
pub mod source;
pub mod types;

pub use cache::DocumentCache;
pub use loader::DatasetLoader;
pub use source::{source_for, DatasetSource, FileSource, HttpSource, StaticSource};
pub use types::{GroupYearRecord, RawDataset, YearGroups, YearTable};
