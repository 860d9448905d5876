//! # Schema Collector Pipeline
//!
//! Each repository found by the crawler is one JSON record listing the
//! GraphQL schema files in it. The stages here annotate those records in
//! place:
//!
//! 1. [`classify`](pipeline::classify) marks schemas that define a query root.
//! 2. [`merge`](pipeline::merge) completes those entry schemas with sibling
//!    schemas using [`graphql_merge`].
//! 3. [`validate`](pipeline::validate) builds every schema with
//!    `apollo-compiler` and flags the valid ones.
//! 4. [`dedupe`](pipeline::dedupe) flags valid schemas whose definitions
//!    already appeared in an earlier record.
//!
//! Records are independent, so the first three stages run in parallel.
//! Deduplication depends on record order and always runs sequentially.

pub mod batch;
pub mod classify;
pub mod duplicates;
mod error;
pub mod merge;
pub mod pipeline;
pub mod record;
pub mod validity;

pub use batch::{record_files, RecordFailure, StageReport};
pub use classify::{contains_query_type, ClassifySummary};
pub use duplicates::{schema_fingerprint, DuplicateSummary, SeenSchemas};
pub use error::{CollectorError, Result};
pub use merge::{MergeOptions, MergeSummary};
pub use pipeline::{run_pipeline, PipelineReport, PipelineTotals};
pub use record::{MergedSchemaRecord, RepoRecord, SchemaRecord};
pub use validity::{schema_errors, ValidityReport, ValiditySummary};
