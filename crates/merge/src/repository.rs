//! Resolving every entry fragment of one repository.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::outcome::MergeOutcome;
use crate::pool::{CandidatePool, RejectedFragment, SchemaFragment};
use crate::resolver::resolve;

/// How the candidate pool is shared between the entries of one repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoolPolicy {
    /// One pool for the whole repository. Fragments consumed by an earlier
    /// entry are unavailable to later ones.
    #[default]
    Shared,
    /// Every entry starts from the full repository pool.
    PerEntry,
}

impl std::fmt::Display for PoolPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shared => write!(f, "shared"),
            Self::PerEntry => write!(f, "per-entry"),
        }
    }
}

/// A repository fragment and whether it is an entry.
#[derive(Debug, Clone)]
pub struct RepositoryFragment {
    pub fragment: SchemaFragment,
    pub is_entry: bool,
}

impl RepositoryFragment {
    #[must_use]
    pub const fn entry(fragment: SchemaFragment) -> Self {
        Self {
            fragment,
            is_entry: true,
        }
    }

    #[must_use]
    pub const fn auxiliary(fragment: SchemaFragment) -> Self {
        Self {
            fragment,
            is_entry: false,
        }
    }
}

/// The result for one entry.
#[derive(Debug)]
pub struct EntryResolution {
    /// Position of the entry in the input slice.
    pub index: usize,
    pub result: Result<MergeOutcome>,
}

#[derive(Debug, Default)]
pub struct RepositoryResolution {
    /// One result per entry, in input order.
    pub entries: Vec<EntryResolution>,
    /// Auxiliary fragments that could not join the pool.
    pub rejected: Vec<RejectedFragment>,
}

/// Resolve each entry of a repository in input order.
///
/// The pool is built from the non-entry fragments only. A failed run leaves
/// the pool as it was and the next entry proceeds.
#[tracing::instrument(skip_all, fields(fragments = fragments.len(), %policy))]
pub fn resolve_repository(
    fragments: &[RepositoryFragment],
    policy: PoolPolicy,
) -> RepositoryResolution {
    let (pool, rejected) = CandidatePool::from_fragments(
        fragments
            .iter()
            .filter(|f| !f.is_entry)
            .map(|f| f.fragment.clone()),
    );

    let mut shared = pool.clone();
    let mut entries = Vec::new();

    for (index, item) in fragments.iter().enumerate().filter(|(_, f)| f.is_entry) {
        let result = match policy {
            PoolPolicy::Shared => resolve(&item.fragment, &mut shared),
            PoolPolicy::PerEntry => resolve(&item.fragment, &mut pool.clone()),
        };

        if let Err(error) = &result {
            tracing::warn!(url = %item.fragment.source_url, %error, "Entry fragment could not be resolved");
        }

        entries.push(EntryResolution { index, result });
    }

    tracing::debug!(
        entries = entries.len(),
        remaining = shared.len(),
        "Resolved repository"
    );

    RepositoryResolution { entries, rejected }
}
