use crate::commands::common::report_error;
use crate::{ExitCode, OutputFormat, OutputOptions};
use colored::Colorize;
use graphql_merge::{CandidatePool, MergeOutcome, RejectedFragment, Resolution, SchemaFragment};
use std::path::{Path, PathBuf};

/// Resolve one entry file against candidate files.
///
/// File paths double as provenance URLs, so the merged text's comments
/// name the files it was assembled from.
#[tracing::instrument(skip(fragments, format, output_opts), fields(entry = %entry.display(), fragments = fragments.len()))]
pub fn run(
    entry: &Path,
    fragments: &[PathBuf],
    output: Option<&Path>,
    format: OutputFormat,
    output_opts: OutputOptions,
) -> ExitCode {
    let entry_fragment = match read_fragment(entry) {
        Ok(fragment) => fragment,
        Err(e) => {
            report_error(format, &format!("Failed to read {}: {e}", entry.display()));
            return ExitCode::IoError;
        }
    };

    let mut candidates = Vec::with_capacity(fragments.len());
    for path in fragments.iter().filter(|path| path.as_path() != entry) {
        match read_fragment(path) {
            Ok(fragment) => candidates.push(fragment),
            Err(e) => {
                report_error(format, &format!("Failed to read {}: {e}", path.display()));
                return ExitCode::IoError;
            }
        }
    }

    let (mut pool, rejected) = CandidatePool::from_fragments(candidates);
    let outcome = match graphql_merge::resolve(&entry_fragment, &mut pool) {
        Ok(outcome) => outcome,
        Err(e) => {
            report_error(format, &e.to_string());
            return ExitCode::ParseError;
        }
    };

    if let Some(path) = output {
        if let Err(e) = std::fs::write(path, &outcome.merged_text) {
            report_error(format, &format!("Failed to write {}: {e}", path.display()));
            return ExitCode::IoError;
        }
    }

    match format {
        OutputFormat::Human => {
            if output_opts.show_info {
                print_rejected(&rejected);
                print_outcome(&outcome);
            }
            if output.is_none() {
                if output_opts.show_info {
                    println!("{}", "---".dimmed());
                }
                println!("{}", outcome.merged_text);
            }
        }
        OutputFormat::Json => println!("{}", outcome_json(&outcome, &rejected)),
    }

    ExitCode::Success
}

fn read_fragment(path: &Path) -> std::io::Result<SchemaFragment> {
    let text = std::fs::read_to_string(path)?;
    let name = path.display().to_string();
    Ok(SchemaFragment::new(name.clone(), name, text))
}

fn print_rejected(rejected: &[RejectedFragment]) {
    for fragment in rejected {
        eprintln!(
            "{} {} {}",
            "!".yellow().bold(),
            fragment.fragment.source_path.cyan(),
            format!("skipped: {}", fragment.error).yellow()
        );
    }
}

fn print_outcome(outcome: &MergeOutcome) {
    let resolution = outcome.resolution();
    let label = match resolution {
        Resolution::AlreadyComplete => "✓ Already complete".green().bold(),
        Resolution::Resolved => "✓ Resolved".green().bold(),
        Resolution::Partial => "! Partially resolved".yellow().bold(),
        Resolution::Unresolved => "✗ Unresolved".red().bold(),
    };
    println!("{label}");

    for step in &outcome.steps {
        println!(
            "  {} {} {} {}",
            "+".green(),
            step.source_path.cyan(),
            format!("for {}", step.symbol).dimmed(),
            format!("({})", step.pass).dimmed()
        );
    }
    if !outcome.types_unresolved.is_empty() {
        println!(
            "  {} {}",
            "types still missing:".yellow(),
            outcome.types_unresolved.join(", ")
        );
    }
    if !outcome.directives_unresolved.is_empty() {
        println!(
            "  {} {}",
            "directives still missing:".yellow(),
            outcome.directives_unresolved.join(", ")
        );
    }
}

fn outcome_json(outcome: &MergeOutcome, rejected: &[RejectedFragment]) -> serde_json::Value {
    let rejected: Vec<_> = rejected
        .iter()
        .map(|r| {
            serde_json::json!({
                "path": r.fragment.source_path,
                "error": r.error.to_string(),
            })
        })
        .collect();
    serde_json::json!({
        "resolution": outcome.resolution(),
        "outcome": outcome,
        "rejected": rejected,
    })
}
