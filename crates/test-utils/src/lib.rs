//! Shared test utilities for the schema collector crates.
//!
//! - [`fixtures`]: schema fragments with GitHub-style provenance URLs, and
//!   per-repository JSON records written to a temporary records directory.
//! - [`assertions`]: stable text renderings of merge outcomes for `insta`.

pub mod assertions;
pub mod fixtures;

pub use assertions::{format_messages, format_outcome};
pub use fixtures::{fragment, repo_url, RecordsDir, RepoBuilder};
