//! Builders for fragments and repository records.
//!
//! ```ignore
//! use graphql_test_utils::{RecordsDir, RepoBuilder};
//!
//! let dir = RecordsDir::new();
//! dir.write(
//!     "acme_api.json",
//!     &RepoBuilder::new("acme/api")
//!         .schema("query.graphql", "type Query { pet: Pet }")
//!         .schema("pet.graphql", "type Pet { name: String }")
//!         .build(),
//! );
//! ```

use std::path::{Path, PathBuf};

use graphql_merge::SchemaFragment;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

/// The blob URL a fixture fragment at `path` gets as its provenance.
#[must_use]
pub fn repo_url(path: &str) -> String {
    format!("https://github.com/acme/api/blob/main/{path}")
}

/// A fragment whose provenance URL is derived from its path.
#[must_use]
pub fn fragment(path: &str, text: &str) -> SchemaFragment {
    SchemaFragment::new(path, repo_url(path), text)
}

/// Builds one repository record as the crawler writes them.
#[derive(Debug, Clone)]
pub struct RepoBuilder {
    full_name: String,
    schemas: Vec<Value>,
}

impl RepoBuilder {
    #[must_use]
    pub fn new(full_name: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            schemas: Vec::new(),
        }
    }

    /// Add a schema entry with content.
    #[must_use]
    pub fn schema(self, path: &str, content: &str) -> Self {
        self.schema_with(path, content, Map::new())
    }

    /// Add a schema entry with content and extra attributes, such as a
    /// precomputed `containsQueryType`.
    #[must_use]
    pub fn schema_with(mut self, path: &str, content: &str, extra: Map<String, Value>) -> Self {
        let mut schema = self.base_schema(path);
        schema.insert("content".to_string(), Value::String(content.to_string()));
        schema.extend(extra);
        self.schemas.push(Value::Object(schema));
        self
    }

    /// Add a schema entry whose content could not be fetched.
    #[must_use]
    pub fn schema_without_content(mut self, path: &str) -> Self {
        let schema = self.base_schema(path);
        self.schemas.push(Value::Object(schema));
        self
    }

    fn base_schema(&self, path: &str) -> Map<String, Value> {
        let name = path.rsplit('/').next().unwrap_or(path);
        let sha = format!("{:040x}", self.schemas.len() + 1);
        let mut map = Map::new();
        map.insert("name".to_string(), json!(name));
        map.insert("path".to_string(), json!(path));
        map.insert(
            "url".to_string(),
            json!(format!("https://api.github.com/repos/{}/contents/{path}", self.full_name)),
        );
        map.insert(
            "git_url".to_string(),
            json!(format!("https://api.github.com/repos/{}/git/blobs/{sha}", self.full_name)),
        );
        map.insert(
            "html_url".to_string(),
            json!(format!("https://github.com/{}/blob/main/{path}", self.full_name)),
        );
        map.insert("sha".to_string(), json!(sha));
        map
    }

    #[must_use]
    pub fn build(self) -> Value {
        json!({
            "repo_full_name": self.full_name,
            "repo_url": format!("https://github.com/{}", self.full_name),
            "schemas": self.schemas,
        })
    }
}

/// A temporary records directory.
#[derive(Debug)]
pub struct RecordsDir {
    dir: TempDir,
}

impl RecordsDir {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `record` as pretty JSON to `file_name`.
    pub fn write(&self, file_name: &str, record: &Value) -> PathBuf {
        let path = self.dir.path().join(file_name);
        std::fs::write(&path, serde_json::to_string_pretty(record).unwrap()).unwrap();
        path
    }

    /// Read `file_name` back as JSON.
    #[must_use]
    pub fn read(&self, file_name: &str) -> Value {
        let text = std::fs::read_to_string(self.dir.path().join(file_name)).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    /// The `index`-th schema of the record in `file_name`.
    #[must_use]
    pub fn schema(&self, file_name: &str, index: usize) -> Value {
        self.read(file_name)["schemas"][index].clone()
    }
}

impl Default for RecordsDir {
    fn default() -> Self {
        Self::new()
    }
}
