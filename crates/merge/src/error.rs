use graphql_syntax::SyntaxError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MergeError>;

/// Why a resolution run was abandoned.
///
/// Missing symbols are not errors; they end up in the outcome's unresolved
/// lists. Only text that stops parsing aborts a run.
#[derive(Debug, Clone, Error)]
pub enum MergeError {
    #[error("entry fragment {url} does not parse: {source}")]
    EntrySyntax { url: String, source: SyntaxError },

    #[error("merged schema for {url} does not parse after adding {culprit}: {source}")]
    MergedSyntax {
        url: String,
        culprit: String,
        source: SyntaxError,
    },
}

impl MergeError {
    /// Provenance URL of the entry fragment whose run was abandoned.
    #[must_use]
    pub fn entry_url(&self) -> &str {
        match self {
            Self::EntrySyntax { url, .. } | Self::MergedSyntax { url, .. } => url,
        }
    }
}
