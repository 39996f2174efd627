use std::collections::BTreeSet;
use std::sync::Arc;

use crate::dataset::{DatasetLoader, RawDataset};
use crate::error::CoreError;
use crate::scoring::{compute_scores, Mode, ScoreRow};

/// Baseline venue when conference scores are requested without one.
pub const DEFAULT_BASELINE_CONFERENCE: &str = "ICLR";

/// Baseline area used by the CLI when neither config nor flags name one.
pub const DEFAULT_BASELINE_AREA: &str = "Machine learning";

/// Entry point for callers: owns the dataset loader and runs scoring requests
/// against whatever it has loaded.
///
/// Scoring calls are synchronous and never fetch. Call [`load`](Self::load)
/// first; before that they fail with [`CoreError::NotLoaded`].
pub struct IclrPoints {
    loader: DatasetLoader,
}

impl IclrPoints {
    pub fn new(loader: DatasetLoader) -> Self {
        Self { loader }
    }

    /// Shortcut for a pipeline over a fixed, already-parsed dataset.
    pub fn with_dataset(dataset: RawDataset) -> Self {
        Self::new(DatasetLoader::preloaded(dataset))
    }

    pub async fn load(&self) -> Result<Arc<RawDataset>, CoreError> {
        self.loader.load().await
    }

    /// Scores for every area with publications in `[from_year, to_year]`,
    /// normalized so that `baseline_area` scores 1.00.
    pub fn area_scores(
        &self,
        from_year: i32,
        to_year: i32,
        baseline_area: &str,
    ) -> Result<Vec<ScoreRow>, CoreError> {
        self.scores(from_year, to_year, baseline_area, Mode::Area)
    }

    /// Scores for every venue, normalized against `baseline_conference`
    /// (default [`DEFAULT_BASELINE_CONFERENCE`]).
    pub fn conference_scores(
        &self,
        from_year: i32,
        to_year: i32,
        baseline_conference: Option<&str>,
    ) -> Result<Vec<ScoreRow>, CoreError> {
        let baseline = baseline_conference.unwrap_or(DEFAULT_BASELINE_CONFERENCE);
        self.scores(from_year, to_year, baseline, Mode::Conference)
    }

    pub fn scores(
        &self,
        from_year: i32,
        to_year: i32,
        baseline: &str,
        mode: Mode,
    ) -> Result<Vec<ScoreRow>, CoreError> {
        let dataset = self.loader.get()?;
        compute_scores(&dataset, from_year, to_year, baseline, mode)
    }

    /// Areas eligible as a baseline.
    pub fn available_areas(&self) -> Result<BTreeSet<String>, CoreError> {
        Ok(self.loader.get()?.available_areas.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::StaticSource;
    use serde_json::json;

    fn document() -> serde_json::Value {
        json!({
            "years": {
                "2020": {
                    "AreaA": { "publication_count": 10, "faculty_names": ["Alice", "Bob"] },
                    "AreaB": { "publication_count": 5, "faculty_names": ["Alice"] }
                },
                "2021": {
                    "AreaA": { "publication_count": 0, "faculty_names": [] },
                    "AreaB": { "publication_count": 5, "faculty_names": ["Carol"] }
                }
            },
            "years_by_conference": {
                "2020": {
                    "ICLR": { "publication_count": 8, "faculty_names": ["Alice", "Bob"], "area": "AreaA" },
                    "SOSP": { "publication_count": 2, "faculty_names": ["Carol"] }
                },
                "2021": {
                    "ICLR": { "publication_count": 2, "faculty_names": ["Alice"] },
                    "SOSP": { "publication_count": 2, "faculty_names": ["Carol", "Alice"] },
                    "WORKSHOP": { "publication_count": 1, "faculty_names": ["Dan"] }
                }
            },
            "area_to_parent": { "AreaA": "AI", "AreaB": "Systems" },
            "conference_to_area": { "SOSP": "AreaB" },
            "available_areas": ["AreaA", "AreaB"]
        })
    }

    async fn loaded() -> IclrPoints {
        let points = IclrPoints::new(DatasetLoader::new(StaticSource::new(document())));
        points.load().await.unwrap();
        points
    }

    #[test]
    fn test_scoring_before_load_fails_fast() {
        let points = IclrPoints::new(DatasetLoader::new(StaticSource::new(document())));
        assert_eq!(points.area_scores(2020, 2021, "AreaA").unwrap_err(), CoreError::NotLoaded);
        assert_eq!(points.conference_scores(2020, 2021, None).unwrap_err(), CoreError::NotLoaded);
        assert_eq!(points.available_areas().unwrap_err(), CoreError::NotLoaded);
    }

    #[tokio::test]
    async fn test_area_scenario() {
        let points = loaded().await;
        let rows = points.area_scores(2020, 2021, "AreaA").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "AreaA");
        assert_eq!(rows[0].faculty_count, 1.5);
        assert_eq!(rows[0].iclr_points, 1.0);
        assert_eq!(rows[1].key, "AreaB");
        assert_eq!(rows[1].publication_count, 10);
        assert_eq!(rows[1].faculty_count, 1.5);
        assert_eq!(rows[1].iclr_points, 1.0);
    }

    #[tokio::test]
    async fn test_invalid_baseline_range_is_empty() {
        let points = loaded().await;
        assert!(points.area_scores(2021, 2021, "AreaA").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_range_past_available_years() {
        let points = loaded().await;
        let wide = points.area_scores(1970, 2030, "AreaA").unwrap();
        let exact = points.area_scores(2020, 2021, "AreaA").unwrap();
        assert_eq!(wide, exact);
    }

    #[tokio::test]
    async fn test_repeat_calls_identical() {
        let points = loaded().await;
        let first = points.area_scores(2020, 2021, "AreaB").unwrap();
        let second = points.area_scores(2020, 2021, "AreaB").unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_conference_scores_default_baseline() {
        let points = loaded().await;
        let rows = points.conference_scores(2020, 2021, None).unwrap();

        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["ICLR", "SOSP", "WORKSHOP"]);

        let iclr = &rows[0];
        assert_eq!(iclr.iclr_points, 1.0);
        assert_eq!(iclr.area.as_deref(), Some("AreaA"));
        assert_eq!(iclr.parent.as_deref(), Some("AI"));

        let sosp = &rows[1];
        assert_eq!(sosp.area.as_deref(), Some("AreaB"));
        assert_eq!(sosp.parent.as_deref(), Some("Systems"));

        let workshop = &rows[2];
        assert_eq!(workshop.area, None);
        assert_eq!(workshop.parent, None);
    }

    #[tokio::test]
    async fn test_conference_scores_explicit_baseline() {
        let points = loaded().await;
        let rows = points.conference_scores(2020, 2021, Some("SOSP")).unwrap();
        let sosp = rows.iter().find(|r| r.key == "SOSP").unwrap();
        assert_eq!(sosp.iclr_points, 1.0);
    }

    #[tokio::test]
    async fn test_conference_scores_without_venue_data() {
        let points = IclrPoints::new(DatasetLoader::new(StaticSource::new(json!({ "years": {} }))));
        points.load().await.unwrap();
        assert_eq!(
            points.conference_scores(2020, 2021, None).unwrap_err(),
            CoreError::ConferenceDataUnavailable
        );
    }

    #[tokio::test]
    async fn test_available_areas() {
        let points = loaded().await;
        let areas: Vec<_> = points.available_areas().unwrap().into_iter().collect();
        assert_eq!(areas, vec!["AreaA".to_string(), "AreaB".to_string()]);
    }

    #[test]
    fn test_with_dataset_needs_no_load() {
        let dataset = RawDataset::from_document(document()).unwrap();
        let points = IclrPoints::with_dataset(dataset);
        assert_eq!(points.area_scores(2020, 2021, "AreaA").unwrap().len(), 2);
    }
}
