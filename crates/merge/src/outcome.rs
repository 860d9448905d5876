use serde::Serialize;

/// Which closure loop a merge step belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosurePass {
    Types,
    Directives,
}

impl std::fmt::Display for ClosurePass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Types => write!(f, "types"),
            Self::Directives => write!(f, "directives"),
        }
    }
}

/// One fragment folded into the merged text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeStep {
    pub pass: ClosurePass,
    /// The undefined symbol this fragment was chosen for.
    pub symbol: String,
    pub source_path: String,
    pub source_url: String,
}

/// How a run ended, derived from a [`MergeOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resolution {
    /// Nothing was missing; nothing was merged.
    AlreadyComplete,
    /// At least one fragment was merged and nothing is missing any more.
    Resolved,
    /// At least one fragment was merged but some symbols remain missing.
    Partial,
    /// Symbols are missing and no fragment could be merged.
    Unresolved,
}

/// Final result of resolving one entry fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// The entry's provenance-tagged text followed by every merged fragment's.
    pub merged_text: String,
    /// Paths of merged fragments, in merge order, without duplicates.
    pub merged_origins: Vec<String>,
    pub types_introduced: Vec<String>,
    pub directives_introduced: Vec<String>,
    /// Missing type names against the final text, in first-seen order.
    pub types_unresolved: Vec<String>,
    /// Missing directive names against the final text, in first-seen order.
    pub directives_unresolved: Vec<String>,
    pub steps: Vec<MergeStep>,
}

impl MergeOutcome {
    #[must_use]
    pub fn merged_any(&self) -> bool {
        !self.merged_origins.is_empty()
    }

    #[must_use]
    pub fn has_unresolved(&self) -> bool {
        !self.types_unresolved.is_empty() || !self.directives_unresolved.is_empty()
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        match (self.merged_any(), self.has_unresolved()) {
            (false, false) => Resolution::AlreadyComplete,
            (true, false) => Resolution::Resolved,
            (true, true) => Resolution::Partial,
            (false, true) => Resolution::Unresolved,
        }
    }
}
