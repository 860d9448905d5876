//! Reading, transforming and rewriting the records directory.
//!
//! A record that cannot be read, parsed or written is logged and reported as
//! a failure; the remaining records are still processed.

use std::fs;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use graphql_config::CollectorConfig;
use rayon::prelude::*;

use crate::error::{CollectorError, Result};
use crate::record::RepoRecord;

/// The record files selected by `config`, in file-name order.
///
/// The `start..end` range indexes the full sorted listing; skipped names
/// inside the range are then dropped.
#[tracing::instrument(skip_all, fields(records = %config.records.display()))]
pub fn record_files(config: &CollectorConfig) -> Result<Vec<PathBuf>> {
    if !config.records.is_dir() {
        return Err(CollectorError::MissingRecords(config.records.clone()));
    }

    let pattern = config.records.join("*.json");
    let mut files = glob::glob(&pattern.to_string_lossy())?
        .collect::<std::result::Result<Vec<PathBuf>, _>>()?;
    files.sort();

    let range = config.record_range(files.len());
    let total = files.len();
    let selected: Vec<PathBuf> = files
        .drain(range)
        .filter(|path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            !config.is_skipped(name) && path != &config.validity_report_path()
        })
        .collect();

    tracing::debug!(total, selected = selected.len(), "Listed record files");
    Ok(selected)
}

pub fn read_record(path: &Path) -> Result<RepoRecord> {
    let text = fs::read_to_string(path).map_err(|source| CollectorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CollectorError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `record` as 2-space indented JSON.
pub fn write_record(path: &Path, record: &RepoRecord) -> Result<()> {
    let text = serde_json::to_string_pretty(record).map_err(|source| CollectorError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| CollectorError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug)]
pub struct RecordFailure {
    pub path: PathBuf,
    pub error: CollectorError,
}

/// What a stage did across all selected records.
#[derive(Debug, Default)]
pub struct StageReport<S> {
    /// Records read, transformed and written back.
    pub processed: usize,
    pub summary: S,
    pub failures: Vec<RecordFailure>,
}

impl<S> StageReport<S> {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

fn process<S>(path: &Path, stage: impl FnOnce(&mut RepoRecord) -> S) -> Result<S> {
    let mut record = read_record(path)?;
    tracing::trace!(repo = record.name(), "Processing record");
    let summary = stage(&mut record);
    write_record(path, &record)?;
    Ok(summary)
}

fn tally<S: Default + AddAssign>(
    files: &[PathBuf],
    results: impl IntoIterator<Item = Result<S>>,
) -> StageReport<S> {
    let mut report = StageReport::default();

    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(summary) => {
                report.processed += 1;
                report.summary += summary;
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Record failed");
                report.failures.push(RecordFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    report
}

/// Apply `stage` to every record, in parallel when `parallel` is set.
///
/// Summaries are combined in file order either way.
pub fn run_stage<S, F>(files: &[PathBuf], parallel: bool, stage: F) -> StageReport<S>
where
    S: Default + AddAssign + Send,
    F: Fn(&mut RepoRecord) -> S + Sync,
{
    if parallel {
        let results: Vec<Result<S>> = files.par_iter().map(|path| process(path, &stage)).collect();
        tally(files, results)
    } else {
        run_sequential(files, stage)
    }
}

/// Apply `stage` to every record strictly in file order.
pub fn run_sequential<S, F>(files: &[PathBuf], mut stage: F) -> StageReport<S>
where
    S: Default + AddAssign,
    F: FnMut(&mut RepoRecord) -> S,
{
    tally(
        files,
        files.iter().map(|path| process(path, &mut stage)),
    )
}
