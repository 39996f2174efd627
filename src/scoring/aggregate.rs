use std::collections::{BTreeMap, BTreeSet};

use crate::dataset::{RawDataset, YearTable};
use crate::error::CoreError;

/// Which group universe a request scores over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Groups are research areas (`years`).
    Area,
    /// Groups are venues (`years_by_conference`); each venue may belong to an area.
    Conference,
}

impl Mode {
    /// The per-year table this mode reads.
    fn table<'a>(&self, dataset: &'a RawDataset) -> Result<&'a YearTable, CoreError> {
        match self {
            Mode::Area => Ok(&dataset.years),
            Mode::Conference => dataset
                .years_by_conference
                .as_ref()
                .ok_or(CoreError::ConferenceDataUnavailable),
        }
    }
}

/// Range-level totals for one `(from, to, mode)` request.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRange {
    pub mode: Mode,
    /// Group -> publications summed over the range
    pub publication_counts: BTreeMap<String, u64>,
    /// Group -> union of faculty names over the range
    pub faculty: BTreeMap<String, BTreeSet<String>>,
    /// Venue -> owning area. Empty in area mode.
    pub owning_area: BTreeMap<String, String>,
}

impl AggregatedRange {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            publication_counts: BTreeMap::new(),
            faculty: BTreeMap::new(),
            owning_area: BTreeMap::new(),
        }
    }

    /// True when no group accumulated any publications ("no data in range").
    pub fn is_empty(&self) -> bool {
        self.publication_counts.values().all(|&count| count == 0)
    }

    /// The area a group belongs to: the group itself in area mode, the owning
    /// area (if known) in conference mode.
    pub fn area_of<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        match self.mode {
            Mode::Area => Some(key),
            Mode::Conference => self.owning_area.get(key).map(String::as_str),
        }
    }
}

/// Merge per-year records over the inclusive range `[from_year, to_year]`.
///
/// Years missing from the dataset are skipped. Publication counts are summed;
/// faculty sets are unioned, so a name seen in several years counts once per
/// group. The dataset is only read; faculty sets are copied, never aliased.
pub fn aggregate(
    dataset: &RawDataset,
    from_year: i32,
    to_year: i32,
    mode: Mode,
) -> Result<AggregatedRange, CoreError> {
    let table = mode.table(dataset)?;
    let mut aggregated = AggregatedRange::new(mode);

    if from_year > to_year {
        return Ok(aggregated);
    }

    if mode == Mode::Conference {
        aggregated.owning_area = dataset.conference_to_area.clone();
    }

    for (year, groups) in table.range(from_year..=to_year) {
        log::trace!("Aggregating {} groups for {}", groups.len(), year);

        for (group, record) in groups {
            *aggregated
                .publication_counts
                .entry(group.clone())
                .or_insert(0) += record.publication_count;

            aggregated
                .faculty
                .entry(group.clone())
                .or_default()
                .extend(record.faculty_names.iter().cloned());

            if mode == Mode::Conference {
                if let Some(area) = &record.area {
                    aggregated
                        .owning_area
                        .entry(group.clone())
                        .or_insert_with(|| area.clone());
                }
            }
        }
    }

    log::debug!(
        "Aggregated {} groups over {}..={} ({:?} mode)",
        aggregated.publication_counts.len(),
        from_year,
        to_year,
        mode
    );

    Ok(aggregated)
}
