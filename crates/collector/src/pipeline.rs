//! Stage drivers over a records directory.

use std::fs;

use graphql_config::CollectorConfig;
use serde::Serialize;

use crate::batch::{record_files, run_sequential, run_stage, StageReport};
use crate::classify::{classify_record, ClassifySummary};
use crate::duplicates::{dedupe_record, DuplicateSummary, SeenSchemas};
use crate::error::{CollectorError, Result};
use crate::merge::{merge_record, MergeOptions, MergeSummary};
use crate::validity::{validate_record, Validation, ValiditySummary};

/// Set `containsQueryType` on every schema.
#[tracing::instrument(skip_all)]
pub fn classify(config: &CollectorConfig) -> Result<StageReport<ClassifySummary>> {
    let files = record_files(config)?;
    let report = run_stage(&files, config.parallel, classify_record);
    tracing::info!(
        records = report.processed,
        failed = report.failures.len(),
        summary = ?report.summary,
        "Classify stage finished"
    );
    Ok(report)
}

/// Complete entry schemas from their repositories.
#[tracing::instrument(skip_all, fields(pool = %options.pool))]
pub fn merge(
    config: &CollectorConfig,
    options: MergeOptions,
) -> Result<StageReport<MergeSummary>> {
    let files = record_files(config)?;
    let report = run_stage(&files, config.parallel, |record| merge_record(record, options));
    tracing::info!(
        records = report.processed,
        failed = report.failures.len(),
        summary = ?report.summary,
        "Merge stage finished"
    );
    Ok(report)
}

/// Flag valid schemas and write the validity report.
#[tracing::instrument(skip_all)]
pub fn validate(config: &CollectorConfig) -> Result<StageReport<ValiditySummary>> {
    let files = record_files(config)?;
    let report = run_stage(&files, config.parallel, validate_record);

    let path = config.validity_report_path();
    let text = serde_json::to_string_pretty(&report.summary.report).map_err(|source| {
        CollectorError::Json {
            path: path.clone(),
            source,
        }
    })?;
    fs::write(&path, text).map_err(|source| CollectorError::Write {
        path: path.clone(),
        source,
    })?;

    let StageReport {
        processed,
        summary: Validation { summary, .. },
        failures,
    } = report;
    tracing::info!(
        records = processed,
        failed = failures.len(),
        ?summary,
        report = %path.display(),
        "Validate stage finished"
    );
    Ok(StageReport {
        processed,
        summary,
        failures,
    })
}

/// Flag structural duplicates. Always sequential: the first occurrence in
/// file order is the original.
#[tracing::instrument(skip_all)]
pub fn dedupe(config: &CollectorConfig) -> Result<StageReport<DuplicateSummary>> {
    let files = record_files(config)?;
    let mut seen = SeenSchemas::new();
    let report = run_sequential(&files, |record| dedupe_record(record, &mut seen));
    tracing::info!(
        records = report.processed,
        failed = report.failures.len(),
        summary = ?report.summary,
        distinct = seen.len(),
        "Dedupe stage finished"
    );
    Ok(report)
}

/// Per-stage results of a full pipeline run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub classify: StageReport<ClassifySummary>,
    pub merge: StageReport<MergeSummary>,
    pub validate: StageReport<ValiditySummary>,
    pub dedupe: StageReport<DuplicateSummary>,
}

impl PipelineReport {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.classify.has_failures()
            || self.merge.has_failures()
            || self.validate.has_failures()
            || self.dedupe.has_failures()
    }

    #[must_use]
    pub fn totals(&self) -> PipelineTotals {
        PipelineTotals {
            classify: self.classify.summary,
            merge: self.merge.summary,
            validate: self.validate.summary,
            dedupe: self.dedupe.summary,
        }
    }
}

/// Summaries of every stage, for JSON output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PipelineTotals {
    pub classify: ClassifySummary,
    pub merge: MergeSummary,
    pub validate: ValiditySummary,
    pub dedupe: DuplicateSummary,
}

/// Run classify, merge, validate and dedupe in that order.
#[tracing::instrument(skip_all)]
pub fn run_pipeline(config: &CollectorConfig, options: MergeOptions) -> Result<PipelineReport> {
    Ok(PipelineReport {
        classify: classify(config)?,
        merge: merge(config, options)?,
        validate: validate(config)?,
        dedupe: dedupe(config)?,
    })
}
