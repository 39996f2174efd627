use thiserror::Error;

/// Errors surfaced by the scoring core.
///
/// An empty result is never an error: scoring calls return `Ok(vec![])` when
/// the range holds no data or the baseline is unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The dataset source could not be retrieved or did not parse.
    /// Nothing is cached, so a later `load()` may retry.
    #[error("Dataset unavailable: {0}")]
    DataUnavailable(String),

    /// Conference mode was requested but the dataset has no venue-level records.
    #[error("Dataset has no venue-level records (years_by_conference is missing)")]
    ConferenceDataUnavailable,

    /// A scoring call was made before the dataset was ever loaded.
    #[error("Dataset has not been loaded; call load() first")]
    NotLoaded,
}

impl CoreError {
    /// Wrap an anyhow error chain as `DataUnavailable`, keeping every context layer.
    pub fn data_unavailable(err: anyhow::Error) -> Self {
        CoreError::DataUnavailable(format!("{:#}", err))
    }
}
