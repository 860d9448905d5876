//! Completes entry schemas with sibling schemas of the same repository.

use std::ops::AddAssign;

use graphql_config::MergeConfig;
use graphql_merge::{
    resolve_repository, MergeOutcome, PoolPolicy, RepositoryFragment, Resolution, SchemaFragment,
};
use serde::Serialize;

use crate::classify::contains_query_type;
use crate::record::{MergedSchemaRecord, RepoRecord, SchemaRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    pub pool: PoolPolicy,
    /// Record partial merges in a `merged` attribute.
    pub record_partial: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::from(&MergeConfig::default())
    }
}

impl From<&MergeConfig> for MergeOptions {
    fn from(config: &MergeConfig) -> Self {
        Self {
            pool: config.pool,
            record_partial: config.record_partial,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub entries: usize,
    pub already_complete: usize,
    pub resolved: usize,
    pub partial: usize,
    pub unresolved: usize,
    pub aborted: usize,
    pub rejected_fragments: usize,
}

impl AddAssign for MergeSummary {
    fn add_assign(&mut self, other: Self) {
        self.entries += other.entries;
        self.already_complete += other.already_complete;
        self.resolved += other.resolved;
        self.partial += other.partial;
        self.unresolved += other.unresolved;
        self.aborted += other.aborted;
        self.rejected_fragments += other.rejected_fragments;
    }
}

/// Whether a schema is an entry. Unclassified schemas are classified on the fly.
fn is_entry(schema: &SchemaRecord) -> bool {
    match schema.contains_query_type {
        Some(_) => schema.is_entry(),
        None => contains_query_type(schema.content.as_deref()) == Some(true),
    }
}

/// Resolve every entry schema of `record` and write the outcomes back.
#[tracing::instrument(skip_all, fields(repo = record.name(), pool = %options.pool))]
pub fn merge_record(record: &mut RepoRecord, options: MergeOptions) -> MergeSummary {
    let mut summary = MergeSummary::default();

    // Indices into `record.schemas` of the schemas that have content.
    let mut indices = Vec::new();
    let mut fragments = Vec::new();
    for (index, schema) in record.schemas.iter_mut().enumerate() {
        schema.clear_merge();
        let Some(content) = schema.content.as_deref() else {
            continue;
        };
        let fragment = SchemaFragment::new(schema.path.as_str(), schema.html_url.as_str(), content);
        fragments.push(if is_entry(schema) {
            RepositoryFragment::entry(fragment)
        } else {
            RepositoryFragment::auxiliary(fragment)
        });
        indices.push(index);
    }

    let resolution = resolve_repository(&fragments, options.pool);
    summary.rejected_fragments = resolution.rejected.len();

    for entry in resolution.entries {
        summary.entries += 1;
        let schema = &mut record.schemas[indices[entry.index]];
        match entry.result {
            Ok(outcome) => {
                let kind = apply_outcome(schema, outcome, options.record_partial);
                match kind {
                    Resolution::AlreadyComplete => summary.already_complete += 1,
                    Resolution::Resolved => summary.resolved += 1,
                    Resolution::Partial => summary.partial += 1,
                    Resolution::Unresolved => summary.unresolved += 1,
                }
            }
            Err(error) => {
                tracing::warn!(path = %schema.path, %error, "Skipping entry schema");
                summary.aborted += 1;
            }
        }
    }

    tracing::debug!(?summary, "Merged record");
    summary
}

/// Write `outcome` onto the entry schema.
pub fn apply_outcome(
    schema: &mut SchemaRecord,
    outcome: MergeOutcome,
    record_partial: bool,
) -> Resolution {
    let resolution = outcome.resolution();

    match resolution {
        Resolution::AlreadyComplete => {}
        Resolution::Resolved => {
            schema.merged = Some(merged_record(outcome, false));
        }
        Resolution::Partial => {
            if record_partial {
                schema.merged = Some(merged_record(outcome, true));
            }
        }
        Resolution::Unresolved => {
            schema.types_undefined = Some(outcome.types_unresolved);
            schema.directives_undefined = Some(outcome.directives_unresolved);
        }
    }

    resolution
}

fn merged_record(outcome: MergeOutcome, with_unresolved: bool) -> MergedSchemaRecord {
    let non_empty = |names: Vec<String>| (!names.is_empty()).then_some(names);
    let (types_undefined, directives_undefined) = if with_unresolved {
        (
            non_empty(outcome.types_unresolved),
            non_empty(outcome.directives_unresolved),
        )
    } else {
        (None, None)
    };

    MergedSchemaRecord {
        merged_content: outcome.merged_text,
        merged_paths: outcome.merged_origins,
        types_defined_by_merge: outcome.types_introduced,
        directives_defined_by_merge: outcome.directives_introduced,
        types_undefined,
        directives_undefined,
        ..MergedSchemaRecord::default()
    }
}
