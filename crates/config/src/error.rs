use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config in {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
}
