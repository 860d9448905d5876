use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectorError>;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid record {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("records directory {0} does not exist")]
    MissingRecords(PathBuf),

    #[error("invalid records pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to list records: {0}")]
    Glob(#[from] glob::GlobError),
}
