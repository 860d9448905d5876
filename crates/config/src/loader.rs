use crate::{CollectorConfig, ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".schema-collector.yml",
    ".schema-collector.yaml",
    ".schema-collector.json",
    "schema-collector.config.yml",
    "schema-collector.config.yaml",
    "schema-collector.config.json",
];

/// Find a collector config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a collector config from the specified path.
/// Detects the format from the file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<CollectorConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        records = %config.records.display(),
        pool = %config.merge.pool,
        parallel = config.parallel,
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a collector config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<CollectorConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let config = match extension {
        "yml" | "yaml" => {
            tracing::trace!("Parsing as YAML");
            parse_yaml(contents, path)?
        }
        "json" => {
            tracing::trace!("Parsing as JSON");
            parse_json(contents, path)?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    tracing::debug!("Validating config");
    validate_config(&config, path)?;

    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<CollectorConfig> {
    // An empty YAML document means "all defaults".
    if contents.trim().is_empty() {
        return Ok(CollectorConfig::default());
    }
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<CollectorConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Validate a configuration, for example after command-line overrides.
/// The path is used for error messages.
pub fn validate_config(config: &CollectorConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if config.records.as_os_str().is_empty() {
        return Err(invalid("'records' must not be empty".to_string()));
    }

    if let Some(end) = config.end {
        if config.start > end {
            return Err(invalid(format!(
                "'start' ({}) is greater than 'end' ({end})",
                config.start
            )));
        }
    }

    if config.validity_report.trim().is_empty() {
        return Err(invalid("'validity_report' must not be empty".to_string()));
    }

    tracing::debug!("Config validation passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_merge::PoolPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let yaml = r"
records: data/records
skip: [_countRefactored.json, notes.json]
start: 5
end: 50
parallel: false
merge:
  pool: per-entry
  record_partial: false
";
        let file = write_temp(".yml", yaml);

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.records, PathBuf::from("data/records"));
        assert_eq!(config.skip.len(), 2);
        assert_eq!(config.start, 5);
        assert_eq!(config.end, Some(50));
        assert!(!config.parallel);
        assert_eq!(config.merge.pool, PoolPolicy::PerEntry);
        assert!(!config.merge.record_partial);
        assert_eq!(config.validity_report, "addValidSchema.json");
    }

    #[test]
    fn test_load_json() {
        let json = r#"{ "records": "out", "merge": { "pool": "shared" } }"#;
        let file = write_temp(".json", json);

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.records, PathBuf::from("out"));
        assert_eq!(config.merge.pool, PoolPolicy::Shared);
        assert!(config.merge.record_partial);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = load_config_from_str("", Path::new(".schema-collector.yml")).unwrap();
        assert_eq!(config, CollectorConfig::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = load_config_from_str("recordz: x\n", Path::new("c.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_unknown_pool_policy_is_rejected() {
        let err =
            load_config_from_str(r#"{"merge": {"pool": "global"}}"#, Path::new("c.json"))
                .unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_validation_start_after_end() {
        let err = load_config_from_str("start: 10\nend: 2\n", Path::new("c.yml")).unwrap_err();
        assert!(err.to_string().contains("'start' (10) is greater than 'end' (2)"));
    }

    #[test]
    fn test_validation_empty_records() {
        let result = load_config_from_str(r#"{"records": ""}"#, Path::new("c.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_empty_validity_report() {
        let result = load_config_from_str(r#"{"validity_report": " "}"#, Path::new("c.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unsupported_format() {
        let err = load_config_from_str("records = 'x'", Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".schema-collector.yml");
        fs::write(&config_path, "records: refactored").unwrap();

        let found = find_config(temp_dir.path()).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("schema-collector.config.json");
        fs::write(&config_path, "{}").unwrap();

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let found = find_config(&sub_dir).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".schema-collector.json"), "{}").unwrap();
        fs::write(temp_dir.path().join(".schema-collector.yaml"), "start: 1").unwrap();

        let found = find_config(temp_dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), ".schema-collector.yaml");
    }
}
