pub mod aggregate;
pub mod engine;
pub mod fractional;

pub use aggregate::{aggregate, AggregatedRange, Mode};
pub use engine::{round_to, score, ScoreRow};
pub use fractional::compute_fractional_credit;

use crate::dataset::RawDataset;
use crate::error::CoreError;

/// Run the full pipeline over an already-loaded dataset:
/// aggregate the range, compute fractional credit, normalize against the baseline.
pub fn compute_scores(
    dataset: &RawDataset,
    from_year: i32,
    to_year: i32,
    baseline: &str,
    mode: Mode,
) -> Result<Vec<ScoreRow>, CoreError> {
    let aggregated = aggregate(dataset, from_year, to_year, mode)?;
    if aggregated.is_empty() {
        log::debug!("No publications in {}..={}", from_year, to_year);
        return Ok(Vec::new());
    }

    let credit = compute_fractional_credit(&aggregated.faculty);
    Ok(score(&aggregated, &credit, baseline, &dataset.area_to_parent))
}
