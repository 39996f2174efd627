//! ICLR Points: turn per-year, per-area publication and faculty-authorship
//! records into a normalized score per research area (or per venue),
//! relative to a chosen baseline.
//!
//! ```text
//!  DatasetSource ──► DatasetLoader (cached once) ──► aggregate ──► fractional credit ──► score
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod scoring;

pub use dataset::{DatasetLoader, DatasetSource, RawDataset};
pub use error::CoreError;
pub use pipeline::{IclrPoints, DEFAULT_BASELINE_AREA, DEFAULT_BASELINE_CONFERENCE};
pub use scoring::{compute_scores, Mode, ScoreRow};
