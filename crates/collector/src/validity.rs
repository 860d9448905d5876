//! Flags schemas that build into a valid GraphQL schema.

use std::ops::AddAssign;

use apollo_compiler::Schema;
use serde::{Deserialize, Serialize};

use crate::record::RepoRecord;

/// Validate `source` as a complete schema.
///
/// Returns the error messages; empty means valid.
#[must_use]
pub fn schema_errors(source: &str) -> Vec<String> {
    match Schema::parse_and_validate(source, "schema.graphql") {
        Ok(_) => Vec::new(),
        Err(with_errors) => {
            let messages: Vec<String> = with_errors
                .errors
                .iter()
                .map(|diagnostic| first_line(&diagnostic.to_string()))
                .collect();
            if messages.is_empty() {
                vec!["schema is invalid".to_string()]
            } else {
                messages
            }
        }
    }
}

fn first_line(report: &str) -> String {
    report.lines().next().unwrap_or(report).trim().to_string()
}

/// Error messages collected by the validate stage, written as
/// `{ "content": [...], "merged": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityReport {
    /// Errors of schemas that were not merged.
    pub content: Vec<String>,
    /// Errors of merged schemas.
    pub merged: Vec<String>,
}

impl ValidityReport {
    pub fn extend(&mut self, other: Self) {
        self.content.extend(other.content);
        self.merged.extend(other.merged);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValiditySummary {
    pub valid: usize,
    pub invalid: usize,
    pub merged_valid: usize,
    pub merged_invalid: usize,
}

impl AddAssign for ValiditySummary {
    fn add_assign(&mut self, other: Self) {
        self.valid += other.valid;
        self.invalid += other.invalid;
        self.merged_valid += other.merged_valid;
        self.merged_invalid += other.merged_invalid;
    }
}

/// Counts and error messages of one or more validated records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub summary: ValiditySummary,
    pub report: ValidityReport,
}

impl AddAssign for Validation {
    fn add_assign(&mut self, other: Self) {
        self.summary += other.summary;
        self.report.extend(other.report);
    }
}

/// Set `validSchema` on each schema with content, and on its `merged`
/// attribute when present.
#[tracing::instrument(skip_all, fields(repo = record.name()))]
pub fn validate_record(record: &mut RepoRecord) -> Validation {
    let mut summary = ValiditySummary::default();
    let mut report = ValidityReport::default();

    for schema in &mut record.schemas {
        if let Some(content) = schema.content.as_deref() {
            let errors = schema_errors(content);
            schema.valid_schema = Some(errors.is_empty());
            if errors.is_empty() {
                summary.valid += 1;
            } else {
                summary.invalid += 1;
                // A schema that needed merging is known to be incomplete.
                if schema.merged.is_none() {
                    report.content.extend(errors);
                }
            }
        }

        if let Some(merged) = schema.merged.as_mut() {
            let errors = schema_errors(&merged.merged_content);
            merged.valid_schema = Some(errors.is_empty());
            if errors.is_empty() {
                summary.merged_valid += 1;
            } else {
                summary.merged_invalid += 1;
                report.merged.extend(errors);
            }
        }
    }

    tracing::debug!(?summary, "Validated record");
    Validation { summary, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MergedSchemaRecord, SchemaRecord};

    #[test]
    fn test_valid_schema() {
        assert!(schema_errors("type Query { pet: Pet } type Pet { name: String }").is_empty());
    }

    #[test]
    fn test_undefined_type_is_invalid() {
        let errors = schema_errors("type Query { pet: Pet }");
        assert!(!errors.is_empty());
        assert!(errors[0].contains("Pet"), "{errors:?}");
    }

    #[test]
    fn test_syntax_error_is_invalid() {
        assert!(!schema_errors("type Query {").is_empty());
    }

    #[test]
    fn test_validate_record() {
        let mut record = RepoRecord {
            repo_full_name: Some("acme/api".to_string()),
            schemas: vec![
                SchemaRecord {
                    content: Some("type Query { pet: Pet }".to_string()),
                    merged: Some(MergedSchemaRecord {
                        merged_content: "type Query { pet: Pet } type Pet { a: Int }".to_string(),
                        ..MergedSchemaRecord::default()
                    }),
                    ..SchemaRecord::default()
                },
                SchemaRecord {
                    content: Some("type Query { owner: Owner }".to_string()),
                    ..SchemaRecord::default()
                },
                SchemaRecord::default(),
            ],
            extra: serde_json::Map::new(),
        };

        let Validation { summary, report } = validate_record(&mut record);

        assert_eq!(
            summary,
            ValiditySummary {
                valid: 0,
                invalid: 2,
                merged_valid: 1,
                merged_invalid: 0,
            }
        );
        assert_eq!(record.schemas[0].valid_schema, Some(false));
        assert_eq!(
            record.schemas[0].merged.as_ref().unwrap().valid_schema,
            Some(true)
        );
        assert_eq!(record.schemas[2].valid_schema, None);
        assert!(!report.content.is_empty());
        assert!(report.content.iter().all(|m| !m.contains("`Pet`")));
        assert!(report.content.iter().any(|m| m.contains("Owner")));
        assert!(report.merged.is_empty());
    }
}
