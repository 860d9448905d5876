//! Root operation bindings from `schema { ... }` definitions.

use apollo_parser::cst;

use crate::NameExt;

/// Operation type (query, mutation, subscription).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    fn from_cst(op_type: &cst::OperationType) -> Self {
        if op_type.mutation_token().is_some() {
            Self::Mutation
        } else if op_type.subscription_token().is_some() {
            Self::Subscription
        } else {
            Self::Query
        }
    }
}

/// A `query: Query` style binding inside a schema definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootOperationBinding {
    pub operation: OperationType,
    pub type_name: String,
}

/// Extension trait for schema definitions.
pub trait SchemaDefinitionExt {
    /// Root operation bindings in source order. Incomplete bindings are skipped.
    fn root_operation_bindings(&self) -> Vec<RootOperationBinding>;
}

impl SchemaDefinitionExt for cst::SchemaDefinition {
    fn root_operation_bindings(&self) -> Vec<RootOperationBinding> {
        self.root_operation_type_definitions()
            .filter_map(|root| {
                let operation = OperationType::from_cst(&root.operation_type()?);
                let type_name = root.named_type()?.name_text()?;
                Some(RootOperationBinding {
                    operation,
                    type_name,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apollo_parser::Parser;

    fn schema_definition(source: &str) -> cst::SchemaDefinition {
        Parser::new(source)
            .parse()
            .document()
            .definitions()
            .find_map(|def| match def {
                cst::Definition::SchemaDefinition(schema) => Some(schema),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_root_operation_bindings() {
        let schema = schema_definition(
            r"
            schema {
                query: RootQuery
                mutation: RootMutation
                subscription: RootSubscription
            }
        ",
        );

        assert_eq!(
            schema.root_operation_bindings(),
            vec![
                RootOperationBinding {
                    operation: OperationType::Query,
                    type_name: "RootQuery".to_string(),
                },
                RootOperationBinding {
                    operation: OperationType::Mutation,
                    type_name: "RootMutation".to_string(),
                },
                RootOperationBinding {
                    operation: OperationType::Subscription,
                    type_name: "RootSubscription".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_query_only_binding() {
        let schema = schema_definition("schema { query: Query }");
        let bindings = schema.root_operation_bindings();

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].operation, OperationType::Query);
        assert_eq!(bindings[0].type_name, "Query");
    }
}
