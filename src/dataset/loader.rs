use std::sync::Arc;
use tokio::sync::OnceCell;

use super::source::DatasetSource;
use super::types::RawDataset;
use crate::error::CoreError;

/// Loads the dataset once and hands out shared read-only views of it.
///
/// Concurrent first calls to [`load`](Self::load) wait on a single in-flight
/// fetch. A failed fetch publishes nothing, so the next call retries. Once
/// published, the dataset is never invalidated.
pub struct DatasetLoader {
    source: Box<dyn DatasetSource>,
    cell: OnceCell<Arc<RawDataset>>,
}

impl DatasetLoader {
    pub fn new(source: impl DatasetSource + 'static) -> Self {
        Self::from_boxed(Box::new(source))
    }

    pub fn from_boxed(source: Box<dyn DatasetSource>) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// A loader that already holds `dataset` and never touches a source.
    pub fn preloaded(dataset: RawDataset) -> Self {
        Self {
            source: Box::new(super::source::StaticSource::new(serde_json::Value::Null)),
            cell: OnceCell::new_with(Some(Arc::new(dataset))),
        }
    }

    /// Return the cached dataset, fetching and parsing it on first use.
    pub async fn load(&self) -> Result<Arc<RawDataset>, CoreError> {
        let dataset = self
            .cell
            .get_or_try_init(|| async {
                let label = self.source.describe();
                log::debug!("Fetching dataset from {}", label);

                let document = self
                    .source
                    .fetch_raw_document()
                    .await
                    .map_err(CoreError::data_unavailable)?;
                let dataset =
                    RawDataset::from_document(document).map_err(CoreError::data_unavailable)?;

                log::info!(
                    "Loaded dataset from {}: {} years, {} areas{}",
                    label,
                    dataset.years.len(),
                    dataset.available_areas.len(),
                    if dataset.years_by_conference.is_some() {
                        ", with venue records"
                    } else {
                        ""
                    }
                );
                Ok::<_, CoreError>(Arc::new(dataset))
            })
            .await?;

        Ok(Arc::clone(dataset))
    }

    /// The cached dataset, or `NotLoaded` if no load has succeeded yet.
    pub fn get(&self) -> Result<Arc<RawDataset>, CoreError> {
        self.cell.get().cloned().ok_or(CoreError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
