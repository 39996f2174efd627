use std::collections::{BTreeMap, BTreeSet};

/// Fractional faculty credit per group.
///
/// A faculty member found in `n` groups gives `1/n` to each of them, so the
/// credits over all groups sum to the number of distinct faculty. Groups with
/// no faculty get no entry.
///
/// Faculty are visited in name order, so the result depends only on the
/// mapping's contents.
pub fn compute_fractional_credit(
    group_to_faculty: &BTreeMap<String, BTreeSet<String>>,
) -> BTreeMap<String, f64> {
    let mut faculty_to_groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (group, faculty) in group_to_faculty {
        for name in faculty {
            faculty_to_groups
                .entry(name.as_str())
                .or_default()
                .push(group.as_str());
        }
    }

    let mut credit: BTreeMap<String, f64> = BTreeMap::new();
    for groups in faculty_to_groups.values() {
        let share = 1.0 / groups.len() as f64;
        for group in groups {
            *credit.entry((*group).to_string()).or_insert(0.0) += share;
        }
    }

    credit
}
