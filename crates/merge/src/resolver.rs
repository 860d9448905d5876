//! The closure loops that grow an entry fragment into a complete schema.
//!
//! Each iteration re-parses the whole merged text and re-derives the missing
//! symbols from scratch, so references introduced by a merged fragment are
//! picked up on the next iteration.
//!
//! A pass stops at the *first* missing symbol no candidate defines, even if
//! later missing symbols could still be satisfied. Downstream consumers rely
//! on the unresolved lists reflecting exactly this order-dependent policy.

use graphql_syntax::ParsedDocument;

use crate::error::{MergeError, Result};
use crate::outcome::{ClosurePass, MergeOutcome, MergeStep};
use crate::pool::{Candidate, CandidatePool, SchemaFragment};
use crate::references::{undefined_directive_names, undefined_type_names};
use crate::similarity;

impl ClosurePass {
    fn undefined(self, doc: &ParsedDocument) -> Vec<String> {
        match self {
            Self::Types => undefined_type_names(doc),
            Self::Directives => undefined_directive_names(doc),
        }
    }

    fn candidates<'p>(self, pool: &'p CandidatePool, name: &str) -> Vec<&'p Candidate> {
        match self {
            Self::Types => pool.fragments_defining_type(name),
            Self::Directives => pool.fragments_defining_directive(name),
        }
    }

    fn introduced(self, candidate: &Candidate, undefined: &[String]) -> Vec<String> {
        match self {
            Self::Types => candidate.type_definitions_among(undefined),
            Self::Directives => candidate.directive_definitions_among(undefined),
        }
    }
}

/// Working state of one resolution attempt.
#[derive(Debug)]
pub struct MergeRun<'e> {
    entry: &'e SchemaFragment,
    merged_text: String,
    merged_origins: Vec<String>,
    types_introduced: Vec<String>,
    directives_introduced: Vec<String>,
    steps: Vec<MergeStep>,
    remaining_pool: CandidatePool,
}

impl<'e> MergeRun<'e> {
    #[must_use]
    pub fn new(entry: &'e SchemaFragment, pool: CandidatePool) -> Self {
        Self {
            entry,
            merged_text: entry.tagged_text(),
            merged_origins: Vec::new(),
            types_introduced: Vec::new(),
            directives_introduced: Vec::new(),
            steps: Vec::new(),
            remaining_pool: pool,
        }
    }

    #[must_use]
    pub fn merged_text(&self) -> &str {
        &self.merged_text
    }

    #[must_use]
    pub fn merged_origins(&self) -> &[String] {
        &self.merged_origins
    }

    #[must_use]
    pub const fn remaining_pool(&self) -> &CandidatePool {
        &self.remaining_pool
    }

    fn parse_merged(&self) -> Result<ParsedDocument> {
        graphql_syntax::parse(&self.merged_text).map_err(|source| {
            match self.steps.last() {
                None => MergeError::EntrySyntax {
                    url: self.entry.source_url.clone(),
                    source,
                },
                Some(step) => MergeError::MergedSyntax {
                    url: self.entry.source_url.clone(),
                    culprit: step.source_url.clone(),
                    source,
                },
            }
        })
    }

    /// Run one closure loop to completion.
    ///
    /// Returns the number of fragments merged by this pass.
    pub fn close(&mut self, pass: ClosurePass) -> Result<usize> {
        let mut merged = 0;

        loop {
            let doc = self.parse_merged()?;
            let undefined = pass.undefined(&doc);

            let Some(symbol) = undefined.first() else {
                tracing::debug!(%pass, merged, "Closure pass complete");
                return Ok(merged);
            };

            if self.remaining_pool.is_empty() {
                tracing::debug!(%pass, merged, missing = undefined.len(), "Candidate pool exhausted");
                return Ok(merged);
            }

            let candidates = pass.candidates(&self.remaining_pool, symbol);
            let Some(chosen) = similarity::best(&self.entry.source_path, candidates) else {
                tracing::debug!(
                    %pass,
                    symbol = %symbol,
                    missing = undefined.len(),
                    "No candidate defines symbol; closing pass"
                );
                return Ok(merged);
            };

            let introduced = pass.introduced(chosen, &undefined);
            let fragment = chosen.fragment().clone();
            let symbol = symbol.clone();
            self.absorb(pass, symbol, &fragment, introduced);
            merged += 1;
        }
    }

    fn absorb(
        &mut self,
        pass: ClosurePass,
        symbol: String,
        fragment: &SchemaFragment,
        introduced: Vec<String>,
    ) {
        tracing::debug!(
            %pass,
            symbol = %symbol,
            path = %fragment.source_path,
            introduced = ?introduced,
            "Merging fragment"
        );

        self.merged_text.push('\n');
        self.merged_text.push_str(&fragment.tagged_text());

        if !self.merged_origins.contains(&fragment.source_path) {
            self.merged_origins.push(fragment.source_path.clone());
        }

        let target = match pass {
            ClosurePass::Types => &mut self.types_introduced,
            ClosurePass::Directives => &mut self.directives_introduced,
        };
        for name in introduced {
            if !target.contains(&name) {
                target.push(name);
            }
        }

        let removed = self.remaining_pool.remove(&fragment.source_url);
        tracing::trace!(url = %fragment.source_url, removed, "Removed merged fragment from pool");
        self.steps.push(MergeStep {
            pass,
            symbol,
            source_path: fragment.source_path.clone(),
            source_url: fragment.source_url.clone(),
        });
    }

    /// Recompute the unresolved sets against the final text and hand back the
    /// outcome together with whatever is left of the pool.
    pub fn finish(self) -> Result<(MergeOutcome, CandidatePool)> {
        let doc = self.parse_merged()?;
        let outcome = MergeOutcome {
            types_unresolved: undefined_type_names(&doc),
            directives_unresolved: undefined_directive_names(&doc),
            merged_text: self.merged_text,
            merged_origins: self.merged_origins,
            types_introduced: self.types_introduced,
            directives_introduced: self.directives_introduced,
            steps: self.steps,
        };
        Ok((outcome, self.remaining_pool))
    }
}

/// Resolve `entry` against `pool`: run the type closure, then the directive
/// closure, and report the outcome.
///
/// On success `pool` is left holding only the fragments this run did not
/// consume. On error `pool` is untouched.
#[tracing::instrument(skip_all, fields(entry = %entry.source_path, pool = pool.len()))]
pub fn resolve(entry: &SchemaFragment, pool: &mut CandidatePool) -> Result<MergeOutcome> {
    let mut run = MergeRun::new(entry, pool.clone());
    run.close(ClosurePass::Types)?;
    run.close(ClosurePass::Directives)?;
    let (outcome, remaining) = run.finish()?;

    tracing::debug!(
        resolution = ?outcome.resolution(),
        merged = outcome.merged_origins.len(),
        types_unresolved = outcome.types_unresolved.len(),
        directives_unresolved = outcome.directives_unresolved.len(),
        "Resolved entry fragment"
    );

    *pool = remaining;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Resolution;

    fn fragment(path: &str, text: &str) -> SchemaFragment {
        SchemaFragment::new(path, format!("https://example.com/{path}"), text)
    }

    fn pool(fragments: Vec<SchemaFragment>) -> CandidatePool {
        CandidatePool::from_fragments(fragments).0
    }

    #[test]
    fn test_already_complete() {
        let entry = fragment("schema.graphql", "type Query { name: String }");
        let mut pool = pool(vec![fragment("pet.graphql", "type Pet { name: String }")]);

        let outcome = resolve(&entry, &mut pool).unwrap();

        assert_eq!(outcome.resolution(), Resolution::AlreadyComplete);
        assert_eq!(
            outcome.merged_text,
            "# https://example.com/schema.graphql:\ntype Query { name: String }"
        );
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_transitive_references_are_followed() {
        let entry = fragment("query.graphql", "type Query { pet: Pet }");
        let mut pool = pool(vec![
            fragment("owner.graphql", "type Owner { name: String }"),
            fragment("pet.graphql", "type Pet { owner: Owner }"),
        ]);

        let outcome = resolve(&entry, &mut pool).unwrap();

        assert_eq!(outcome.resolution(), Resolution::Resolved);
        assert_eq!(outcome.merged_origins, vec!["pet.graphql", "owner.graphql"]);
        assert_eq!(outcome.types_introduced, vec!["Pet", "Owner"]);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_first_unsatisfiable_name_halts_the_pass() {
        // `Owner` is available, but `Missing` comes first and nothing defines it.
        let entry = fragment("query.graphql", "type Query { a: Missing, b: Owner }");
        let mut pool = pool(vec![fragment("owner.graphql", "type Owner { name: String }")]);

        let outcome = resolve(&entry, &mut pool).unwrap();

        assert_eq!(outcome.resolution(), Resolution::Unresolved);
        assert_eq!(outcome.types_unresolved, vec!["Missing", "Owner"]);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_directive_pass_runs_after_types() {
        let entry = fragment("query.graphql", "type Query { pet: Pet @auth }");
        let mut pool = pool(vec![
            fragment("directives.graphql", "directive @auth on FIELD_DEFINITION"),
            fragment("pet.graphql", "type Pet { name: String }"),
        ]);

        let outcome = resolve(&entry, &mut pool).unwrap();

        let passes: Vec<_> = outcome.steps.iter().map(|s| s.pass).collect();
        assert_eq!(passes, vec![ClosurePass::Types, ClosurePass::Directives]);
        assert_eq!(outcome.directives_introduced, vec!["auth"]);
        assert_eq!(outcome.resolution(), Resolution::Resolved);
    }

    #[test]
    fn test_directive_fragment_can_satisfy_types_incidentally() {
        let entry = fragment("query.graphql", "type Query { a: Missing @auth }");
        let mut pool = pool(vec![fragment(
            "shared.graphql",
            "directive @auth on FIELD_DEFINITION\nscalar Missing",
        )]);

        let outcome = resolve(&entry, &mut pool).unwrap();

        // The type pass picks this fragment for `Missing` and also gets `auth`.
        assert!(outcome.types_unresolved.is_empty());
        assert!(outcome.directives_unresolved.is_empty());
        assert_eq!(outcome.types_introduced, vec!["Missing"]);
        assert!(outcome.directives_introduced.is_empty());
    }

    #[test]
    fn test_unparseable_entry_is_an_error_and_pool_is_untouched() {
        let entry = fragment("query.graphql", "type Query {");
        let mut pool = pool(vec![fragment("pet.graphql", "type Pet { name: String }")]);

        let err = resolve(&entry, &mut pool).unwrap_err();

        assert!(matches!(err, MergeError::EntrySyntax { .. }));
        assert_eq!(err.entry_url(), "https://example.com/query.graphql");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_unparseable_fragment_never_joins_the_run() {
        let entry = fragment("query.graphql", "type Query { pet: Pet, owner: Owner }");
        let mut pool = pool(vec![
            fragment("pet.graphql", "type Pet { name: String }\n\"\"\"dangling"),
            fragment("owner.graphql", "type Owner { name: String }"),
        ]);
        assert_eq!(pool.len(), 1);

        // `Pet` comes first and nothing left in the pool defines it.
        let outcome = resolve(&entry, &mut pool).unwrap();
        assert_eq!(outcome.types_unresolved, vec!["Pet", "Owner"]);
        assert!(outcome.steps.is_empty());
    }

    #[test]
    fn test_fragment_listed_twice_is_merged_once() {
        let entry = fragment("query.graphql", "type Query { pet: Pet }");
        let mut pool = pool(vec![
            SchemaFragment::new("pet.graphql", "u/pet", "type Pet { owner: Owner }"),
            SchemaFragment::new(
                "pet.graphql",
                "u/pet",
                "type Pet { owner: Owner }\ntype Owner { id: ID }",
            ),
        ]);

        let outcome = resolve(&entry, &mut pool).unwrap();

        assert_eq!(outcome.steps.len(), 1);
        assert_eq!(outcome.steps[0].symbol, "Pet");
        assert_eq!(outcome.merged_text.matches("# u/pet:").count(), 1);
        assert_eq!(outcome.types_unresolved, vec!["Owner"]);
        assert!(pool.is_empty());
    }
}
