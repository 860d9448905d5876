mod commands;
mod exit_code;
mod progress;

use clap::{Parser, Subcommand};
use graphql_config::PoolPolicy;
use std::path::PathBuf;

pub use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "graphql-collector")]
#[command(
    about = "Complete, validate and deduplicate GraphQL schemas collected from repositories",
    long_about = None
)]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to collector config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Records directory (overrides the config file)
    #[arg(short, long, value_name = "DIR", global = true)]
    records: Option<PathBuf>,

    /// Index of the first record file to process
    #[arg(long, value_name = "N", global = true)]
    start: Option<usize>,

    /// Index one past the last record file to process
    #[arg(long, value_name = "N", global = true)]
    end: Option<usize>,

    /// Process record files one at a time
    #[arg(long, global = true)]
    sequential: bool,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Record whether each schema declares a query root type
    Classify {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Complete entry schemas with definitions from their repository
    Merge {
        /// How candidate fragments are shared between entries of one repository
        #[arg(long, value_enum)]
        pool: Option<PoolArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Validate original and merged schemas and write the validity report
    Validate {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Flag structurally identical valid schemas across all records
    Dedupe {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Run classify, merge, validate and dedupe in order
    ///
    /// Stages run one after the other over the whole records directory.
    /// A record that fails in one stage is reported and skipped; the
    /// remaining records carry on.
    Pipeline {
        /// How candidate fragments are shared between entries of one repository
        #[arg(long, value_enum)]
        pool: Option<PoolArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Complete a single schema file from a set of sibling files
    Resolve {
        /// Entry schema file
        entry: PathBuf,

        /// Candidate fragment files, in repository order
        fragments: Vec<PathBuf>,

        /// Write the merged schema to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum PoolArg {
    /// One pool per repository; a merged fragment is unavailable to later entries
    Shared,
    /// Every entry starts from the full repository
    PerEntry,
}

impl From<PoolArg> for PoolPolicy {
    fn from(arg: PoolArg) -> Self {
        match arg {
            PoolArg::Shared => Self::Shared,
            PoolArg::PerEntry => Self::PerEntry,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress,
        show_info: !cli.quiet,
    };

    let overrides = commands::common::RecordOverrides {
        records: cli.records,
        start: cli.start,
        end: cli.end,
        sequential: cli.sequential,
    };

    let code = match cli.command {
        Commands::Classify { format } => {
            commands::stage::classify(cli.config, &overrides, format, output_opts)
        }
        Commands::Merge { pool, format } => commands::stage::merge(
            cli.config,
            &overrides,
            pool.map(PoolPolicy::from),
            format,
            output_opts,
        ),
        Commands::Validate { format } => {
            commands::stage::validate(cli.config, &overrides, format, output_opts)
        }
        Commands::Dedupe { format } => {
            commands::stage::dedupe(cli.config, &overrides, format, output_opts)
        }
        Commands::Pipeline { pool, format } => commands::stage::pipeline(
            cli.config,
            &overrides,
            pool.map(PoolPolicy::from),
            format,
            output_opts,
        ),
        Commands::Resolve {
            entry,
            fragments,
            output,
            format,
        } => commands::resolve::run(&entry, &fragments, output.as_deref(), format, output_opts),
    };

    tracing::debug!(exit_code = code.code(), "Command finished");
    if code != ExitCode::Success {
        code.exit();
    }
    Ok(())
}

/// Initialize tracing, filtered by `RUST_LOG` and off by default
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color {
        control::set_override(false);
    } else if std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if let Ok(val) = std::env::var("CLICOLOR") {
        if val == "0" {
            control::set_override(false);
        }
    }
}
