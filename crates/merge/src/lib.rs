//! # GraphQL Schema Merging
//!
//! Given an entry fragment (a schema file defining a query root) and the other
//! schema files of the same repository, this crate grows the entry into a
//! complete schema by appending whichever sibling fragments define the types
//! and directives it references but does not define.
//!
//! ## Architecture
//!
//! ```text
//! references  undefined type / directive names of a parsed document
//!      |
//! pool        fragments still available, queried by defined symbol
//!      |
//! similarity  path-prefix ranking among fragments defining the same symbol
//!      |
//! resolver    type closure, then directive closure, over the merged text
//!      |
//! repository  every entry of a repository against one pool
//! ```
//!
//! Merged text keeps each source's text verbatim behind a provenance comment:
//!
//! ```text
//! # https://github.com/acme/api/blob/main/query.graphql:
//! type Query { pet: Pet }
//! # https://github.com/acme/api/blob/main/pet.graphql:
//! type Pet { name: String }
//! ```
//!
//! Unresolvable references are not errors. They are reported in
//! [`MergeOutcome::types_unresolved`] and
//! [`MergeOutcome::directives_unresolved`]. Only text that stops parsing
//! aborts a run, as a [`MergeError`].

mod error;
mod outcome;
mod pool;
mod references;
mod repository;
mod resolver;
mod similarity;

pub use error::{MergeError, Result};
pub use outcome::{ClosurePass, MergeOutcome, MergeStep, Resolution};
pub use pool::{Candidate, CandidatePool, RejectedFragment, SchemaFragment};
pub use references::{
    field_references, undefined_directive_names, undefined_type_names, FieldReference,
    Referenced, BUILTIN_SCALARS,
};
pub use repository::{
    resolve_repository, EntryResolution, PoolPolicy, RepositoryFragment, RepositoryResolution,
};
pub use resolver::{resolve, MergeRun};
pub use similarity::{best, path_similarity, rank};
