use std::ops::Range;
use std::path::PathBuf;

use graphql_merge::PoolPolicy;
use serde::{Deserialize, Serialize};

/// Record file the crawler writes next to the repository records.
pub const DEFAULT_SKIP: &str = "_countRefactored.json";

/// Top-level collector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorConfig {
    /// Directory holding one JSON record per repository.
    pub records: PathBuf,

    /// Record file names to ignore.
    pub skip: Vec<String>,

    /// Index of the first record to process, after sorting by file name.
    pub start: usize,

    /// Exclusive end index. `None` processes every record after `start`.
    pub end: Option<usize>,

    /// Process records in parallel where the stage allows it.
    pub parallel: bool,

    /// File name, inside `records`, of the validity error report.
    pub validity_report: String,

    pub merge: MergeConfig,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            records: PathBuf::from("refactored"),
            skip: vec![DEFAULT_SKIP.to_string()],
            start: 0,
            end: None,
            parallel: true,
            validity_report: "addValidSchema.json".to_string(),
            merge: MergeConfig::default(),
        }
    }
}

impl CollectorConfig {
    /// The record index range to process, given how many records exist.
    #[must_use]
    pub fn record_range(&self, total: usize) -> Range<usize> {
        let end = self.end.map_or(total, |end| end.min(total));
        let start = self.start.min(end);
        start..end
    }

    #[must_use]
    pub fn validity_report_path(&self) -> PathBuf {
        self.records.join(&self.validity_report)
    }

    #[must_use]
    pub fn is_skipped(&self, file_name: &str) -> bool {
        self.skip.iter().any(|skip| skip == file_name)
    }
}

/// Settings for the merge stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub pool: PoolPolicy,

    /// Record a `merged` attribute when some fragments were merged but
    /// references remain unresolved.
    pub record_partial: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            pool: PoolPolicy::Shared,
            record_partial: true,
        }
    }
}
