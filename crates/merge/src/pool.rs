//! Schema fragments and the pool of merge candidates for one repository.

use std::sync::Arc;

use graphql_syntax::{DefinitionKind, ParsedDocument, SyntaxError};

/// One file's worth of schema text plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFragment {
    /// Repository-relative path, used for similarity ranking.
    pub source_path: String,
    /// Provenance URL. Also the fragment's identity within a pool.
    pub source_url: String,
    pub raw_text: Arc<str>,
}

impl SchemaFragment {
    pub fn new(
        source_path: impl Into<String>,
        source_url: impl Into<String>,
        raw_text: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            source_url: source_url.into(),
            raw_text: raw_text.into(),
        }
    }

    /// The fragment's text preceded by its provenance comment.
    #[must_use]
    pub fn tagged_text(&self) -> String {
        format!("# {}:\n{}", self.source_url, self.raw_text)
    }
}

/// A pool member: the fragment and its parsed document.
#[derive(Debug, Clone)]
pub struct Candidate {
    fragment: SchemaFragment,
    document: Arc<ParsedDocument>,
}

impl Candidate {
    #[must_use]
    pub const fn fragment(&self) -> &SchemaFragment {
        &self.fragment
    }

    #[must_use]
    pub fn document(&self) -> &ParsedDocument {
        &self.document
    }

    /// Whether any definition other than a schema definition is named `name`.
    #[must_use]
    pub fn defines_type(&self, name: &str) -> bool {
        self.document
            .definitions()
            .iter()
            .any(|def| !def.kind.is_schema() && def.has_name(name))
    }

    #[must_use]
    pub fn defines_directive(&self, name: &str) -> bool {
        self.document.defines_directive(name)
    }

    /// Names of this candidate's type definitions that appear in `wanted`, in
    /// definition order.
    #[must_use]
    pub fn type_definitions_among(&self, wanted: &[String]) -> Vec<String> {
        self.document
            .definitions_of_kind(DefinitionKind::is_type_definition)
            .filter_map(|def| def.name())
            .filter(|name| wanted.iter().any(|w| w.as_str() == *name))
            .map(str::to_string)
            .collect()
    }

    /// Names of this candidate's directive definitions that appear in `wanted`.
    #[must_use]
    pub fn directive_definitions_among(&self, wanted: &[String]) -> Vec<String> {
        self.document
            .definitions_of_kind(DefinitionKind::is_directive)
            .filter_map(|def| def.name())
            .filter(|name| wanted.iter().any(|w| w.as_str() == *name))
            .map(str::to_string)
            .collect()
    }
}

/// A fragment that could not join a pool because its text does not parse.
#[derive(Debug, Clone)]
pub struct RejectedFragment {
    pub fragment: SchemaFragment,
    pub error: SyntaxError,
}

/// The fragments still available for merging, in repository order.
///
/// Cloning is cheap: parsed documents are shared.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    /// Parse each fragment once and admit those that parse.
    #[tracing::instrument(skip_all)]
    pub fn from_fragments(
        fragments: impl IntoIterator<Item = SchemaFragment>,
    ) -> (Self, Vec<RejectedFragment>) {
        let mut candidates = Vec::new();
        let mut rejected = Vec::new();

        for fragment in fragments {
            match graphql_syntax::parse(&fragment.raw_text) {
                Ok(document) => candidates.push(Candidate {
                    fragment,
                    document: Arc::new(document),
                }),
                Err(error) => {
                    tracing::warn!(
                        url = %fragment.source_url,
                        %error,
                        "Fragment does not parse; excluded from candidate pool"
                    );
                    rejected.push(RejectedFragment { fragment, error });
                }
            }
        }

        tracing::debug!(
            admitted = candidates.len(),
            rejected = rejected.len(),
            "Built candidate pool"
        );
        (Self { candidates }, rejected)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Candidates with a non-schema definition named `name`, in pool order.
    #[must_use]
    pub fn fragments_defining_type(&self, name: &str) -> Vec<&Candidate> {
        let found: Vec<&Candidate> = self
            .candidates
            .iter()
            .filter(|candidate| candidate.defines_type(name))
            .collect();
        tracing::trace!(name, candidates = found.len(), "Queried pool for type");
        found
    }

    /// Candidates with a directive definition named `name`, in pool order.
    #[must_use]
    pub fn fragments_defining_directive(&self, name: &str) -> Vec<&Candidate> {
        let found: Vec<&Candidate> = self
            .candidates
            .iter()
            .filter(|candidate| candidate.defines_directive(name))
            .collect();
        tracing::trace!(name, candidates = found.len(), "Queried pool for directive");
        found
    }

    /// Remove every candidate whose provenance URL is `source_url`.
    /// Returns how many were removed.
    pub fn remove(&mut self, source_url: &str) -> usize {
        let before = self.candidates.len();
        self.candidates
            .retain(|candidate| candidate.fragment.source_url != source_url);
        before - self.candidates.len()
    }
}
