use crate::{ExitCode, OutputFormat};
use colored::Colorize;
use graphql_collector::CollectorError;
use graphql_config::{CollectorConfig, ConfigError};
use std::path::{Path, PathBuf};

/// Record selection flags that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct RecordOverrides {
    pub records: Option<PathBuf>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub sequential: bool,
}

/// Loaded configuration for a batch command
pub struct CommandContext {
    pub config: CollectorConfig,
    /// The config file, if one was found or given
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Load the config from an explicit path, or search upward from the
    /// current directory, then apply command-line overrides.
    ///
    /// A relative `records` path in a config file is taken relative to the
    /// file's directory. A `--records` flag is taken as given.
    pub fn load(
        config_path: Option<PathBuf>,
        overrides: &RecordOverrides,
    ) -> Result<Self, ConfigError> {
        let config_path = match config_path {
            Some(path) => Some(path),
            None => graphql_config::find_config(&std::env::current_dir()?)?,
        };

        let mut config = match &config_path {
            Some(path) => {
                let mut config = graphql_config::load_config(path)?;
                if config.records.is_relative() {
                    if let Some(base_dir) = path.parent() {
                        config.records = base_dir.join(&config.records);
                    }
                }
                config
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                CollectorConfig::default()
            }
        };

        apply_overrides(&mut config, overrides);

        let source = config_path
            .as_deref()
            .unwrap_or_else(|| Path::new("<command line>"));
        graphql_config::validate_config(&config, source)?;

        tracing::debug!(
            records = %config.records.display(),
            start = config.start,
            end = ?config.end,
            parallel = config.parallel,
            "Command context ready"
        );
        Ok(Self {
            config,
            config_path,
        })
    }
}

fn apply_overrides(config: &mut CollectorConfig, overrides: &RecordOverrides) {
    if let Some(records) = &overrides.records {
        config.records.clone_from(records);
    }
    if let Some(start) = overrides.start {
        config.start = start;
    }
    if overrides.end.is_some() {
        config.end = overrides.end;
    }
    if overrides.sequential {
        config.parallel = false;
    }
}

/// Print a fatal error in the requested format.
pub fn report_error(format: OutputFormat, message: &str) {
    match format {
        OutputFormat::Human => eprintln!("{} {}", "✗".red().bold(), message.red()),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": message })),
    }
}

/// Exit code for a config that could not be loaded.
pub fn config_error(format: OutputFormat, error: &ConfigError) -> ExitCode {
    report_error(format, &format!("Invalid configuration: {error}"));
    ExitCode::ConfigError
}

/// Exit code for a stage that could not start.
///
/// Per-record failures never reach here; they are part of the stage report.
pub fn collector_error(format: OutputFormat, error: &CollectorError) -> ExitCode {
    report_error(format, &error.to_string());
    match error {
        CollectorError::MissingRecords(_) | CollectorError::Pattern(_) => ExitCode::ConfigError,
        CollectorError::Read { .. }
        | CollectorError::Write { .. }
        | CollectorError::Json { .. }
        | CollectorError::Glob(_) => ExitCode::IoError,
    }
}
