use graphql_apollo_ext::OperationType;

use crate::{Definition, DefinitionKind, ParsedDocument};

/// Conventional query root names, in priority order.
pub const QUERY_ROOT_NAMES: &[&str] = &[
    "Query",
    "RootQuery",
    "RootQueryType",
    "QueryRoot",
    "QueryType",
];

impl ParsedDocument {
    /// Find the object type acting as the query root.
    ///
    /// An explicit `schema { query: X }` binding wins when `X` is defined as an
    /// object type in this document. Otherwise the first object type named after
    /// one of [`QUERY_ROOT_NAMES`] is returned, trying the names in order.
    #[must_use]
    pub fn query_root_type(&self) -> Option<&Definition> {
        let object_type = |name: &str| {
            self.definitions()
                .iter()
                .find(|def| def.kind == DefinitionKind::ObjectType && def.has_name(name))
        };

        let bound = self
            .definitions_of_kind(|kind| kind == DefinitionKind::Schema)
            .next()
            .and_then(|schema| {
                schema
                    .root_operations
                    .iter()
                    .find(|binding| binding.operation == OperationType::Query)
            })
            .and_then(|binding| object_type(&binding.type_name));

        bound.or_else(|| QUERY_ROOT_NAMES.iter().find_map(|&name| object_type(name)))
    }

    /// Whether the document defines a query root type.
    #[must_use]
    pub fn contains_query_type(&self) -> bool {
        self.query_root_type().is_some()
    }
}
