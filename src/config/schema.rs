use serde::{Deserialize, Serialize};

use crate::pipeline::{DEFAULT_BASELINE_AREA, DEFAULT_BASELINE_CONFERENCE};

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// dataset:
///   url: "https://example.org/per_year_data.json"
///   timeout: "30s"
///   cache_ttl: "24h"
/// defaults:
///   from_year: 2019
///   to_year: 2023
///   baseline_area: "Machine learning"
///   baseline_conference: "ICLR"
/// parent_order: ["AI", "Systems", "Theory", "Interdisciplinary Areas"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub defaults: DefaultsConfig,

    /// Display order of parent categories; rows whose parent is not listed go last
    pub parent_order: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            defaults: DefaultsConfig::default(),
            parent_order: vec![
                "AI".to_string(),
                "Systems".to_string(),
                "Theory".to_string(),
                "Interdisciplinary Areas".to_string(),
            ],
        }
    }
}

/// Where to read the per-year dataset from. Set at most one of `path` / `url`;
/// with neither, `per_year_data.json` in the working directory is used.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// HTTP timeout, humantime format ("30s", "2m")
    pub timeout: String,

    /// How long a downloaded document stays fresh in the disk cache
    pub cache_ttl: String,
}

pub const DEFAULT_DATASET_PATH: &str = "per_year_data.json";

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            url: None,
            timeout: "30s".to_string(),
            cache_ttl: "24h".to_string(),
        }
    }
}

impl DatasetConfig {
    /// The configured location, path or URL.
    pub fn location(&self) -> &str {
        self.url
            .as_deref()
            .or(self.path.as_deref())
            .unwrap_or(DEFAULT_DATASET_PATH)
    }
}

/// Request defaults used when the CLI flags are omitted.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub from_year: i32,
    pub to_year: i32,
    pub baseline_area: String,
    pub baseline_conference: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            from_year: 2019,
            to_year: 2023,
            baseline_area: DEFAULT_BASELINE_AREA.to_string(),
            baseline_conference: DEFAULT_BASELINE_CONFERENCE.to_string(),
        }
    }
}
