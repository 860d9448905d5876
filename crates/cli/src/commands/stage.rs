use crate::commands::common::{collector_error, config_error, CommandContext, RecordOverrides};
use crate::progress::StageSpinner;
use crate::{ExitCode, OutputFormat, OutputOptions};
use colored::Colorize;
use graphql_collector::pipeline;
use graphql_collector::{
    ClassifySummary, DuplicateSummary, MergeOptions, MergeSummary, PipelineReport, StageReport,
    ValiditySummary,
};
use graphql_config::PoolPolicy;
use serde::Serialize;
use std::path::PathBuf;

/// Counters shown in a stage's human summary
pub(crate) trait SummaryLines {
    fn lines(&self) -> Vec<(&'static str, usize)>;
}

impl SummaryLines for ClassifySummary {
    fn lines(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("with query type", self.with_query_type),
            ("without query type", self.without_query_type),
            ("unparseable", self.unparseable),
        ]
    }
}

impl SummaryLines for MergeSummary {
    fn lines(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("entries", self.entries),
            ("already complete", self.already_complete),
            ("resolved", self.resolved),
            ("partial", self.partial),
            ("unresolved", self.unresolved),
            ("aborted", self.aborted),
            ("rejected fragments", self.rejected_fragments),
        ]
    }
}

impl SummaryLines for ValiditySummary {
    fn lines(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("valid", self.valid),
            ("invalid", self.invalid),
            ("merged valid", self.merged_valid),
            ("merged invalid", self.merged_invalid),
        ]
    }
}

impl SummaryLines for DuplicateSummary {
    fn lines(&self) -> Vec<(&'static str, usize)> {
        vec![("unique", self.unique), ("duplicates", self.duplicates)]
    }
}

pub fn classify(
    config_path: Option<PathBuf>,
    overrides: &RecordOverrides,
    format: OutputFormat,
    output_opts: OutputOptions,
) -> ExitCode {
    run_single("classify", config_path, overrides, format, output_opts, |ctx| {
        pipeline::classify(&ctx.config)
    })
}

pub fn merge(
    config_path: Option<PathBuf>,
    overrides: &RecordOverrides,
    pool: Option<PoolPolicy>,
    format: OutputFormat,
    output_opts: OutputOptions,
) -> ExitCode {
    run_single("merge", config_path, overrides, format, output_opts, |ctx| {
        pipeline::merge(&ctx.config, merge_options(ctx, pool))
    })
}

pub fn validate(
    config_path: Option<PathBuf>,
    overrides: &RecordOverrides,
    format: OutputFormat,
    output_opts: OutputOptions,
) -> ExitCode {
    run_single("validate", config_path, overrides, format, output_opts, |ctx| {
        pipeline::validate(&ctx.config)
    })
}

pub fn dedupe(
    config_path: Option<PathBuf>,
    overrides: &RecordOverrides,
    format: OutputFormat,
    output_opts: OutputOptions,
) -> ExitCode {
    run_single("dedupe", config_path, overrides, format, output_opts, |ctx| {
        pipeline::dedupe(&ctx.config)
    })
}

#[tracing::instrument(skip_all, fields(pool = ?pool))]
pub fn pipeline(
    config_path: Option<PathBuf>,
    overrides: &RecordOverrides,
    pool: Option<PoolPolicy>,
    format: OutputFormat,
    output_opts: OutputOptions,
) -> ExitCode {
    let ctx = match CommandContext::load(config_path, overrides) {
        Ok(ctx) => ctx,
        Err(e) => return config_error(format, &e),
    };

    let spinner = StageSpinner::start(
        format == OutputFormat::Human && output_opts.show_progress,
        "Running pipeline...",
    );
    let start_time = std::time::Instant::now();
    let result = graphql_collector::run_pipeline(&ctx.config, merge_options(&ctx, pool));
    spinner.finish();

    let report = match result {
        Ok(report) => report,
        Err(e) => return collector_error(format, &e),
    };

    match format {
        OutputFormat::Human => {
            if output_opts.show_info {
                print_human("classify", &report.classify);
                print_human("merge", &report.merge);
                print_human("validate", &report.validate);
                print_human("dedupe", &report.dedupe);
                println!(
                    "{}",
                    format!("Finished in {:.2}s", start_time.elapsed().as_secs_f64()).dimmed()
                );
            } else {
                print_failures(&report.classify);
                print_failures(&report.merge);
                print_failures(&report.validate);
                print_failures(&report.dedupe);
            }
        }
        OutputFormat::Json => println!("{}", pipeline_json(&report)),
    }

    if report.has_failures() {
        ExitCode::RecordFailures
    } else {
        ExitCode::Success
    }
}

fn merge_options(ctx: &CommandContext, pool: Option<PoolPolicy>) -> MergeOptions {
    let mut options = MergeOptions::from(&ctx.config.merge);
    if let Some(pool) = pool {
        options.pool = pool;
    }
    options
}

fn run_single<S, F>(
    stage: &'static str,
    config_path: Option<PathBuf>,
    overrides: &RecordOverrides,
    format: OutputFormat,
    output_opts: OutputOptions,
    run: F,
) -> ExitCode
where
    S: SummaryLines + Serialize,
    F: FnOnce(&CommandContext) -> graphql_collector::Result<StageReport<S>>,
{
    let _span = tracing::info_span!("stage_command", stage).entered();

    let ctx = match CommandContext::load(config_path, overrides) {
        Ok(ctx) => ctx,
        Err(e) => return config_error(format, &e),
    };

    let spinner = StageSpinner::start(
        format == OutputFormat::Human && output_opts.show_progress,
        &format!("Running {stage}..."),
    );
    let result = run(&ctx);
    spinner.finish();

    let report = match result {
        Ok(report) => report,
        Err(e) => return collector_error(format, &e),
    };

    match format {
        OutputFormat::Human if output_opts.show_info => print_human(stage, &report),
        OutputFormat::Human => print_failures(&report),
        OutputFormat::Json => println!("{}", stage_json(stage, &report)),
    }

    if report.has_failures() {
        ExitCode::RecordFailures
    } else {
        ExitCode::Success
    }
}

fn print_human<S: SummaryLines>(stage: &str, report: &StageReport<S>) {
    let mark = if report.has_failures() {
        "!".yellow().bold()
    } else {
        "✓".green().bold()
    };
    println!(
        "{mark} {} {}",
        stage.bold(),
        format!("({} record(s))", report.processed).dimmed()
    );

    let lines = report.summary.lines();
    let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, count) in lines {
        println!("  {label:<width$}  {count}");
    }
    print_failures(report);
}

fn print_failures<S>(report: &StageReport<S>) {
    if !report.has_failures() {
        return;
    }
    eprintln!(
        "{}",
        format!("✗ {} record(s) failed:", report.failures.len()).red()
    );
    for failure in &report.failures {
        eprintln!("  {} {}", failure.path.display().to_string().cyan(), failure.error);
    }
}

fn failures_json<S>(report: &StageReport<S>) -> Vec<serde_json::Value> {
    report
        .failures
        .iter()
        .map(|failure| {
            serde_json::json!({
                "path": failure.path.display().to_string(),
                "error": failure.error.to_string(),
            })
        })
        .collect()
}

fn stage_json<S: Serialize>(stage: &str, report: &StageReport<S>) -> serde_json::Value {
    serde_json::json!({
        "stage": stage,
        "processed": report.processed,
        "summary": report.summary,
        "failures": failures_json(report),
    })
}

fn pipeline_json(report: &PipelineReport) -> serde_json::Value {
    serde_json::json!({
        "totals": report.totals(),
        "stages": [
            stage_json("classify", &report.classify),
            stage_json("merge", &report.merge),
            stage_json("validate", &report.validate),
            stage_json("dedupe", &report.dedupe),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_test_utils::{RecordsDir, RepoBuilder};
    use serde_json::json;

    const QUIET: OutputOptions = OutputOptions {
        show_progress: false,
        show_info: false,
    };

    fn records_dir() -> RecordsDir {
        let dir = RecordsDir::new();
        let record = RepoBuilder::new("acme/api")
            .schema("schema/query.graphql", "type Query { pet: Pet }")
            .schema("schema/pet.graphql", "type Pet { name: String }")
            .build();
        dir.write("acme_api.json", &record);
        dir
    }

    fn overrides(dir: &RecordsDir) -> RecordOverrides {
        RecordOverrides {
            records: Some(dir.path().to_path_buf()),
            sequential: true,
            ..RecordOverrides::default()
        }
    }

    fn config_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join(".schema-collector.yml");
        std::fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_classify_command_updates_records() {
        let dir = records_dir();
        let config_dir = tempfile::tempdir().unwrap();

        let code = classify(
            Some(config_file(&config_dir)),
            &overrides(&dir),
            OutputFormat::Json,
            QUIET,
        );

        assert_eq!(code, ExitCode::Success);
        assert_eq!(dir.schema("acme_api.json", 0)["containsQueryType"], true);
        assert_eq!(dir.schema("acme_api.json", 1)["containsQueryType"], false);
    }

    #[test]
    fn test_broken_record_gives_record_failures() {
        let dir = records_dir();
        std::fs::write(dir.path().join("broken.json"), "[").unwrap();
        let config_dir = tempfile::tempdir().unwrap();

        let code = classify(
            Some(config_file(&config_dir)),
            &overrides(&dir),
            OutputFormat::Human,
            QUIET,
        );

        assert_eq!(code, ExitCode::RecordFailures);
    }

    #[test]
    fn test_missing_records_dir_is_config_error() {
        let config_dir = tempfile::tempdir().unwrap();
        let overrides = RecordOverrides {
            records: Some(config_dir.path().join("nope")),
            ..RecordOverrides::default()
        };

        let code = dedupe(
            Some(config_file(&config_dir)),
            &overrides,
            OutputFormat::Json,
            QUIET,
        );

        assert_eq!(code, ExitCode::ConfigError);
    }

    #[test]
    fn test_pipeline_command_merges_entries() {
        let dir = records_dir();
        let config_dir = tempfile::tempdir().unwrap();

        let code = pipeline(
            Some(config_file(&config_dir)),
            &overrides(&dir),
            Some(PoolPolicy::PerEntry),
            OutputFormat::Json,
            QUIET,
        );

        assert_eq!(code, ExitCode::Success);
        let entry = dir.schema("acme_api.json", 0);
        assert_eq!(entry["merged"]["mergedPaths"], json!(["schema/pet.graphql"]));
        assert_eq!(entry["merged"]["validSchema"], true);
    }

    #[test]
    fn test_stage_json_shape() {
        let report = StageReport {
            processed: 2,
            summary: DuplicateSummary {
                unique: 3,
                duplicates: 1,
            },
            failures: Vec::new(),
        };

        assert_eq!(
            stage_json("dedupe", &report),
            json!({
                "stage": "dedupe",
                "processed": 2,
                "summary": { "unique": 3, "duplicates": 1 },
                "failures": [],
            })
        );
    }

    #[test]
    fn test_merge_summary_lines_cover_every_counter() {
        let summary = MergeSummary {
            entries: 7,
            ..MergeSummary::default()
        };
        let lines = summary.lines();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], ("entries", 7));
    }
}
