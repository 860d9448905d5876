//! The per-repository JSON record format.
//!
//! Only the attributes the stages read or write are typed. Everything else
//! (repository metadata, `sha`, `git_url`, ...) rides along in `extra` and is
//! written back unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One repository: its metadata and the schema files found in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_full_name: Option<String>,

    #[serde(default)]
    pub schemas: Vec<SchemaRecord>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RepoRecord {
    /// Display name for logs.
    #[must_use]
    pub fn name(&self) -> &str {
        self.repo_full_name.as_deref().unwrap_or("<unnamed>")
    }
}

/// One schema file of a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaRecord {
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub html_url: String,

    /// Absent when the crawler could not fetch the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Outer `None`: never classified. `Some(None)`: content missing or
    /// unparseable, written as `null`.
    #[serde(
        rename = "containsQueryType",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub contains_query_type: Option<Option<bool>>,

    #[serde(
        rename = "typesUndefined",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub types_undefined: Option<Vec<String>>,

    #[serde(
        rename = "directivesUndefined",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub directives_undefined: Option<Vec<String>>,

    #[serde(rename = "validSchema", default, skip_serializing_if = "Option::is_none")]
    pub valid_schema: Option<bool>,

    #[serde(
        rename = "contentDuplicate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_duplicate: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged: Option<MergedSchemaRecord>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchemaRecord {
    /// Whether this schema is an entry, i.e. classified as defining a query root.
    #[must_use]
    pub fn is_entry(&self) -> bool {
        self.contains_query_type == Some(Some(true))
    }

    /// Drop everything a previous merge run wrote.
    pub fn clear_merge(&mut self) {
        self.merged = None;
        self.types_undefined = None;
        self.directives_undefined = None;
    }
}

/// The result of completing an entry schema with sibling schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedSchemaRecord {
    #[serde(rename = "mergedContent")]
    pub merged_content: String,

    #[serde(rename = "mergedPaths", default)]
    pub merged_paths: Vec<String>,

    #[serde(rename = "typesDefinedByMerge", default)]
    pub types_defined_by_merge: Vec<String>,

    #[serde(rename = "directivesDefinedByMerge", default)]
    pub directives_defined_by_merge: Vec<String>,

    /// Set only for partial merges.
    #[serde(
        rename = "typesUndefined",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub types_undefined: Option<Vec<String>>,

    #[serde(
        rename = "directivesUndefined",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub directives_undefined: Option<Vec<String>>,

    #[serde(rename = "validSchema", default, skip_serializing_if = "Option::is_none")]
    pub valid_schema: Option<bool>,

    #[serde(
        rename = "contentDuplicate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_duplicate: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Distinguishes an explicit `null` from an absent key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
