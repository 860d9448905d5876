//! Flags schemas whose definitions already appeared earlier in the batch.

use std::collections::HashSet;
use std::ops::AddAssign;

use apollo_compiler::ast;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::record::RepoRecord;

/// SHA-256 over the schema's definitions, each re-serialized and sorted, so
/// formatting, comments and definition order do not matter.
///
/// `None` when the source does not parse.
#[must_use]
pub fn schema_fingerprint(source: &str) -> Option<[u8; 32]> {
    let document = ast::Document::parse(source, "schema.graphql").ok()?;

    let mut definitions: Vec<String> = document
        .definitions
        .iter()
        .map(|definition| {
            let mut single = ast::Document::new();
            single.definitions.push(definition.clone());
            single.to_string()
        })
        .collect();
    definitions.sort();

    let mut hasher = Sha256::new();
    for definition in &definitions {
        hasher.update(definition.as_bytes());
        hasher.update(b"\n");
    }
    let mut fingerprint = [0; 32];
    fingerprint.copy_from_slice(&hasher.finalize());
    Some(fingerprint)
}

/// Fingerprints seen so far. The first schema with a fingerprint is the
/// original, every later one a duplicate.
#[derive(Debug, Default)]
pub struct SeenSchemas {
    fingerprints: HashSet<[u8; 32]>,
}

impl SeenSchemas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source`; returns whether it was seen before, or `None` when it
    /// does not parse.
    pub fn check(&mut self, source: &str) -> Option<bool> {
        let fingerprint = schema_fingerprint(source)?;
        Some(!self.fingerprints.insert(fingerprint))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateSummary {
    pub unique: usize,
    pub duplicates: usize,
}

impl AddAssign for DuplicateSummary {
    fn add_assign(&mut self, other: Self) {
        self.unique += other.unique;
        self.duplicates += other.duplicates;
    }
}

/// Set `contentDuplicate` on valid schemas, preferring the merged schema when
/// it is valid.
#[tracing::instrument(skip_all, fields(repo = record.name(), seen = seen.len()))]
pub fn dedupe_record(record: &mut RepoRecord, seen: &mut SeenSchemas) -> DuplicateSummary {
    let mut summary = DuplicateSummary::default();
    let mut count = |duplicate: Option<bool>| {
        match duplicate {
            Some(true) => summary.duplicates += 1,
            Some(false) => summary.unique += 1,
            None => {}
        }
        duplicate
    };

    for schema in &mut record.schemas {
        schema.content_duplicate = None;
        if let Some(merged) = schema.merged.as_mut() {
            merged.content_duplicate = None;
        }

        if let Some(merged) = schema.merged.as_mut().filter(|m| m.valid_schema == Some(true)) {
            merged.content_duplicate = count(seen.check(&merged.merged_content));
        } else if schema.valid_schema == Some(true) {
            if let Some(content) = schema.content.as_deref() {
                schema.content_duplicate = count(seen.check(content));
            }
        }
    }

    tracing::debug!(?summary, "Checked record for duplicates");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MergedSchemaRecord, SchemaRecord};

    #[test]
    fn test_fingerprint_ignores_order_and_formatting() {
        let a = schema_fingerprint("type Query { a: Int }\ntype Pet { name: String }");
        let b = schema_fingerprint(
            "# comment\ntype Pet {\n  name: String\n}\n\ntype Query {\n  a: Int\n}\n",
        );
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_differs_on_content() {
        let a = schema_fingerprint("type Query { a: Int }");
        let b = schema_fingerprint("type Query { a: String }");
        assert_ne!(a, b);
    }

    #[test]
    fn test_unparseable_has_no_fingerprint() {
        assert!(schema_fingerprint("type Query {").is_none());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut seen = SeenSchemas::new();
        assert_eq!(seen.check("type Query { a: Int }"), Some(false));
        assert_eq!(seen.check("type Query {\n  a: Int\n}"), Some(true));
        assert_eq!(seen.check("type Query { b: Int }"), Some(false));
        assert_eq!(seen.len(), 2);
    }

    fn valid(content: &str) -> SchemaRecord {
        SchemaRecord {
            content: Some(content.to_string()),
            valid_schema: Some(true),
            ..SchemaRecord::default()
        }
    }

    #[test]
    fn test_dedupe_record_prefers_valid_merged_content() {
        let mut merged_entry = valid("type Query { a: Int }");
        merged_entry.merged = Some(MergedSchemaRecord {
            merged_content: "type Query { b: Int }".to_string(),
            valid_schema: Some(true),
            ..MergedSchemaRecord::default()
        });

        let mut invalid = valid("type Query { a: Int }");
        invalid.valid_schema = Some(false);

        let mut record = RepoRecord {
            repo_full_name: None,
            schemas: vec![
                merged_entry,
                valid("type Query { b: Int }"),
                valid("type Query { a: Int }"),
                invalid,
            ],
            extra: serde_json::Map::new(),
        };
        let mut seen = SeenSchemas::new();

        let summary = dedupe_record(&mut record, &mut seen);

        assert_eq!(summary, DuplicateSummary { unique: 2, duplicates: 1 });
        let merged = record.schemas[0].merged.as_ref().unwrap();
        assert_eq!(merged.content_duplicate, Some(false));
        assert_eq!(record.schemas[0].content_duplicate, None);
        assert_eq!(record.schemas[1].content_duplicate, Some(true));
        assert_eq!(record.schemas[2].content_duplicate, Some(false));
        assert_eq!(record.schemas[3].content_duplicate, None);
    }

    #[test]
    fn test_rerun_clears_stale_flags() {
        let mut was_valid = valid("type Query { a: Int }");
        was_valid.content_duplicate = Some(true);
        was_valid.valid_schema = Some(false);
        was_valid.merged = Some(MergedSchemaRecord {
            merged_content: "type Query { b: Int }".to_string(),
            valid_schema: Some(false),
            content_duplicate: Some(false),
            ..MergedSchemaRecord::default()
        });

        let mut record = RepoRecord {
            repo_full_name: None,
            schemas: vec![was_valid],
            extra: serde_json::Map::new(),
        };

        let summary = dedupe_record(&mut record, &mut SeenSchemas::new());

        assert_eq!(summary, DuplicateSummary::default());
        assert_eq!(record.schemas[0].content_duplicate, None);
        assert_eq!(
            record.schemas[0].merged.as_ref().unwrap().content_duplicate,
            None
        );
    }
}
