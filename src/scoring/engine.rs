use serde::Serialize;
use std::collections::BTreeMap;

use super::aggregate::AggregatedRange;

/// One scored group, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    /// Area or venue label
    pub key: String,
    /// The area itself, or the venue's owning area. `None` only for venues
    /// whose owning area is unknown.
    pub area: Option<String>,
    pub parent: Option<String>,
    pub publication_count: u64,
    /// Fractional faculty credit, 2 decimals
    pub faculty_count: f64,
    /// Credit per publication, 6 decimals
    pub faculty_per_pub: f64,
    /// Rate relative to the baseline's rate, 2 decimals
    pub iclr_points: f64,
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Normalize every group against the baseline group.
///
/// Returns rows in ascending key order. The result is empty (not an error)
/// when the range has no data, or when the baseline has no publications or
/// no faculty credit in range. Groups with zero publications are dropped.
pub fn score(
    aggregated: &AggregatedRange,
    fractional_credit: &BTreeMap<String, f64>,
    baseline_key: &str,
    area_to_parent: &BTreeMap<String, String>,
) -> Vec<ScoreRow> {
    if aggregated.is_empty() {
        return Vec::new();
    }

    let baseline_credit = fractional_credit.get(baseline_key).copied().unwrap_or(0.0);
    let baseline_pubs = aggregated
        .publication_counts
        .get(baseline_key)
        .copied()
        .unwrap_or(0);

    if baseline_credit <= 0.0 || baseline_pubs == 0 {
        log::warn!(
            "Baseline '{}' has no usable data in range (credit {}, {} publications)",
            baseline_key,
            baseline_credit,
            baseline_pubs
        );
        return Vec::new();
    }

    let baseline_rate = baseline_credit / baseline_pubs as f64;

    aggregated
        .publication_counts
        .iter()
        .filter(|(_, &pubs)| pubs > 0)
        .map(|(key, &pubs)| {
            let credit = fractional_credit.get(key).copied().unwrap_or(0.0);
            let rate = credit / pubs as f64;
            let area = aggregated.area_of(key).map(str::to_string);
            let parent = area
                .as_deref()
                .and_then(|a| area_to_parent.get(a))
                .cloned();

            ScoreRow {
                key: key.clone(),
                area,
                parent,
                publication_count: pubs,
                faculty_count: round_to(credit, 2),
                faculty_per_pub: round_to(rate, 6),
                iclr_points: round_to(rate / baseline_rate, 2),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::aggregate::{aggregate, Mode};
    use crate::scoring::fractional::compute_fractional_credit;
    use crate::dataset::RawDataset;
    use serde_json::json;

    fn scenario() -> RawDataset {
        RawDataset::from_document(json!({
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
            "area_to_parent": { "AreaA": "AI", "AreaB": "Systems" }
        }))
        .unwrap()
    }

    fn run(ds: &RawDataset, from: i32, to: i32, baseline: &str) -> Vec<ScoreRow> {
        let agg = aggregate(ds, from, to, Mode::Area).unwrap();
        let credit = compute_fractional_credit(&agg.faculty);
        score(&agg, &credit, baseline, &ds.area_to_parent)
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234, 2), 1.23);
        assert_eq!(round_to(1.235_000_1, 2), 1.24);
        assert_eq!(round_to(-1.5, 0), -2.0);
        assert_eq!(round_to(0.1234567, 6), 0.123457);
    }

    #[test]
    fn test_scenario_two_areas() {
        let rows = run(&scenario(), 2020, 2021, "AreaA");
        assert_eq!(rows.len(), 2);

        let a = &rows[0];
        assert_eq!(a.key, "AreaA");
        assert_eq!(a.publication_count, 10);
        assert_eq!(a.faculty_count, 1.5);
        assert_eq!(a.faculty_per_pub, 0.15);
        assert_eq!(a.iclr_points, 1.0);
        assert_eq!(a.parent.as_deref(), Some("AI"));

        let b = &rows[1];
        assert_eq!(b.key, "AreaB");
        assert_eq!(b.publication_count, 10);
        assert_eq!(b.faculty_count, 1.5);
        assert_eq!(b.iclr_points, 1.0);
        assert_eq!(b.parent.as_deref(), Some("Systems"));
    }

    #[test]
    fn test_baseline_scores_one() {
        let rows = run(&scenario(), 2020, 2020, "AreaB");
        let b = rows.iter().find(|r| r.key == "AreaB").unwrap();
        assert_eq!(b.iclr_points, 1.0);

        // AreaA: credit 1.5 / 10 pubs = 0.15; AreaB: 0.5 / 5 = 0.1
        let a = rows.iter().find(|r| r.key == "AreaA").unwrap();
        assert_eq!(a.iclr_points, 1.5);
    }

    #[test]
    fn test_baseline_without_publications_is_empty() {
        let rows = run(&scenario(), 2021, 2021, "AreaA");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_unknown_baseline_is_empty() {
        assert!(run(&scenario(), 2020, 2021, "Nope").is_empty());
    }

    #[test]
    fn test_baseline_without_faculty_is_empty() {
        let ds = RawDataset::from_document(json!({
            "years": {
                "2020": {
                    "AreaA": { "publication_count": 4, "faculty_names": [] },
                    "AreaB": { "publication_count": 4, "faculty_names": ["Alice"] }
                }
            }
        }))
        .unwrap();
        assert!(run(&ds, 2020, 2020, "AreaA").is_empty());
    }

    #[test]
    fn test_empty_range_is_empty() {
        assert!(run(&scenario(), 1980, 1985, "AreaA").is_empty());
    }

    #[test]
    fn test_zero_publication_groups_dropped() {
        let ds = RawDataset::from_document(json!({
            "years": {
                "2020": {
                    "AreaA": { "publication_count": 4, "faculty_names": ["Alice"] },
                    "Ghost": { "publication_count": 0, "faculty_names": ["Bob"] }
                }
            }
        }))
        .unwrap();
        let rows = run(&ds, 2020, 2020, "AreaA");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "AreaA");
    }

    #[test]
    fn test_group_without_faculty_scores_zero() {
        let ds = RawDataset::from_document(json!({
            "years": {
                "2020": {
                    "AreaA": { "publication_count": 4, "faculty_names": ["Alice"] },
                    "AreaB": { "publication_count": 7, "faculty_names": [] }
                }
            }
        }))
        .unwrap();
        let rows = run(&ds, 2020, 2020, "AreaA");
        let b = rows.iter().find(|r| r.key == "AreaB").unwrap();
        assert_eq!(b.faculty_count, 0.0);
        assert_eq!(b.iclr_points, 0.0);
    }

    #[test]
    fn test_rows_sorted_by_key() {
        let ds = RawDataset::from_document(json!({
            "years": {
                "2020": {
                    "zeta": { "publication_count": 1, "faculty_names": ["A"] },
                    "Alpha": { "publication_count": 1, "faculty_names": ["B"] },
                    "beta": { "publication_count": 1, "faculty_names": ["C"] }
                }
            }
        }))
        .unwrap();
        let keys: Vec<_> = run(&ds, 2020, 2020, "beta").into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_unknown_parent_is_none() {
        let ds = RawDataset::from_document(json!({
            "years": { "2020": { "Orphan": { "publication_count": 2, "faculty_names": ["A"] } } }
        }))
        .unwrap();
        let rows = run(&ds, 2020, 2020, "Orphan");
        assert_eq!(rows[0].parent, None);
        assert_eq!(rows[0].area.as_deref(), Some("Orphan"));
    }

    #[test]
    fn test_deterministic() {
        let ds = scenario();
        assert_eq!(run(&ds, 2019, 2022, "AreaA"), run(&ds, 2019, 2022, "AreaA"));
    }
}
