//! Extensions for `apollo-parser`: name extraction, field iteration, and type-reference
//! unwrapping for schema definition language documents.
//!
//! **Note**: This crate is specifically tied to `apollo-parser`'s CST types. The owned,
//! parser-agnostic document model lives in `graphql-syntax`.
//!
//! This crate provides:
//! - **Name extraction helpers** for getting names from CST nodes
//! - **Root operation bindings** from schema definitions
//! - **Field iteration** over object, interface, and input-object definitions
//! - **Type unwrapping** from list/non-null wrappers down to the named type
//!
//! # Example
//!
//! ```
//! use apollo_parser::cst;
//! use graphql_apollo_ext::{FieldsExt, TypeExt};
//!
//! let source = "type Query { pets: [Pet!]! }";
//! let tree = apollo_parser::Parser::new(source).parse();
//!
//! let Some(cst::Definition::ObjectTypeDefinition(query)) = tree.document().definitions().next()
//! else {
//!     panic!("expected an object type");
//! };
//! let field = query.field_nodes().into_iter().next().unwrap();
//! assert_eq!(field.ty.and_then(|ty| ty.innermost_name()), Some("Pet".to_string()));
//! ```

mod fields;
mod names;
mod schema;
mod types;

pub use fields::*;
pub use names::*;
pub use schema::*;
pub use types::*;
