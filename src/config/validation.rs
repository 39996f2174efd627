use std::collections::HashSet;

use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let dataset = &config.dataset;
    if dataset.path.is_some() && dataset.url.is_some() {
        errors.push("dataset: set either path or url, not both".to_string());
    }
    if let Some(ref url) = dataset.url {
        if !crate::dataset::source::is_url(url) {
            errors.push(format!(
                "dataset.url: '{}' must start with http:// or https://",
                url
            ));
        }
    }
    if let Some(ref path) = dataset.path {
        if path.trim().is_empty() {
            errors.push("dataset.path: must not be empty".to_string());
        }
    }
    if let Err(e) = humantime::parse_duration(&dataset.timeout) {
        errors.push(format!(
            "dataset.timeout: invalid duration '{}' - {}",
            dataset.timeout, e
        ));
    }
    if let Err(e) = humantime::parse_duration(&dataset.cache_ttl) {
        errors.push(format!(
            "dataset.cache_ttl: invalid duration '{}' - {}",
            dataset.cache_ttl, e
        ));
    }

    let defaults = &config.defaults;
    if defaults.from_year > defaults.to_year {
        errors.push(format!(
            "defaults.from_year: {} is after defaults.to_year {}",
            defaults.from_year, defaults.to_year
        ));
    }
    if defaults.baseline_area.trim().is_empty() {
        errors.push("defaults.baseline_area: must not be empty".to_string());
    }
    if defaults.baseline_conference.trim().is_empty() {
        errors.push("defaults.baseline_conference: must not be empty".to_string());
    }

    let mut seen = HashSet::new();
    for (i, parent) in config.parent_order.iter().enumerate() {
        if parent.trim().is_empty() {
            errors.push(format!("parent_order[{}]: must not be empty", i));
        } else if !seen.insert(parent.as_str()) {
            errors.push(format!("parent_order[{}]: duplicate '{}'", i, parent));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
