use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-year records keyed by group (area or venue name).
pub type YearGroups = BTreeMap<String, GroupYearRecord>;

/// Year -> group -> record.
pub type YearTable = BTreeMap<i32, YearGroups>;

/// One group's publication record for a single year.
///
/// Used for both area-level and venue-level tables. `area` is only meaningful
/// for venue records, where it names the venue's owning area.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GroupYearRecord {
    pub publication_count: u64,

    /// Faculty who published in this group that year. Duplicates in the source
    /// document collapse on parse.
    #[serde(default)]
    pub faculty_names: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// The per-year dataset the whole pipeline reads from.
///
/// Loaded once by [`DatasetLoader`](super::DatasetLoader) and shared read-only
/// behind an `Arc` afterwards.
///
/// Example JSON:
/// ```json
/// {
///   "years": {
///     "2020": { "Machine learning": { "publication_count": 10, "faculty_names": ["Alice"] } }
///   },
///   "years_by_conference": {
///     "2020": { "ICLR": { "publication_count": 4, "faculty_names": ["Alice"], "area": "Machine learning" } }
///   },
///   "area_to_parent": { "Machine learning": "AI" },
///   "conference_to_area": { "ICLR": "Machine learning" },
///   "available_areas": ["Machine learning"]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RawDataset {
    pub years: YearTable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_by_conference: Option<YearTable>,

    #[serde(default)]
    pub area_to_parent: BTreeMap<String, String>,

    #[serde(default)]
    pub conference_to_area: BTreeMap<String, String>,

    #[serde(default)]
    pub available_areas: BTreeSet<String>,
}

impl RawDataset {
    /// Parse a raw JSON document into a dataset.
    ///
    /// When the document does not list `available_areas`, they are derived from
    /// `area_to_parent`, falling back to every area present in `years`.
    pub fn from_document(document: serde_json::Value) -> anyhow::Result<Self> {
        use anyhow::Context;

        let mut dataset: RawDataset = serde_json::from_value(document)
            .context("Document does not match the per-year dataset layout")?;

        if dataset.available_areas.is_empty() {
            dataset.available_areas = if dataset.area_to_parent.is_empty() {
                dataset
                    .years
                    .values()
                    .flat_map(|groups| groups.keys().cloned())
                    .collect()
            } else {
                dataset.area_to_parent.keys().cloned().collect()
            };
        }

        Ok(dataset)
    }

    /// Inclusive span of years with area-level data.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = *self.years.keys().next()?;
        let last = *self.years.keys().next_back()?;
        Some((first, last))
    }
}
