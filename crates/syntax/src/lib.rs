//! # GraphQL Syntax Parsing
//!
//! This crate turns schema-definition-language text into an owned
//! [`ParsedDocument`]: an ordered list of [`Definition`]s with their names, and
//! for field-bearing types, their fields' type references and applied
//! directives.
//!
//! Parsing is all-or-nothing. `apollo-parser` is error tolerant and always
//! produces a tree, but any reported error turns into a [`SyntaxError`] here;
//! callers never see a partially recovered document.
//!
//! ```
//! use graphql_syntax::{parse, DefinitionKind};
//!
//! let doc = parse("type Query { pets: [Pet!]! }").unwrap();
//! let query = &doc.definitions()[0];
//! assert_eq!(query.kind, DefinitionKind::ObjectType);
//! assert_eq!(query.fields[0].ty.innermost_name(), "Pet");
//!
//! assert!(parse("type Query {").is_err());
//! ```

mod document;
mod error;
mod lower;
mod root;

pub use document::{Definition, DefinitionKind, FieldDefinition, ParsedDocument, TypeRef};
pub use error::{ParseError, SyntaxError};
pub use graphql_apollo_ext::{OperationType, RootOperationBinding};
pub use root::QUERY_ROOT_NAMES;

/// Parse GraphQL text into a [`ParsedDocument`].
///
/// Fails when the parser reports any error, and when the document holds no
/// definitions at all (empty or comment-only text).
#[tracing::instrument(level = "trace", skip(text), fields(len = text.len()))]
pub fn parse(text: &str) -> Result<ParsedDocument, SyntaxError> {
    let tree = apollo_parser::Parser::new(text).parse();

    let errors: Vec<ParseError> = tree
        .errors()
        .map(|e| ParseError {
            message: e.message().to_string(),
            offset: e.index(),
        })
        .collect();

    if !errors.is_empty() {
        tracing::trace!(error_count = errors.len(), "Document failed to parse");
        return Err(SyntaxError { errors });
    }

    let definitions: Vec<Definition> = tree
        .document()
        .definitions()
        .map(|def| lower::lower_definition(&def))
        .collect();

    if definitions.is_empty() {
        return Err(SyntaxError::empty_document());
    }

    Ok(ParsedDocument::new(definitions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_definition_kinds() {
        let source = r#"
            schema { query: Query }
            type Query { pet(id: ID!): Pet }
            interface Node { id: ID! }
            input PetInput { name: String! }
            scalar DateTime
            enum Status { ACTIVE INACTIVE }
            union SearchResult = Pet | Owner
            directive @auth(role: String) on FIELD_DEFINITION
            extend type Pet { age: Int }
            extend schema @link(url: "https://example.com")
            query GetPet { pet(id: "1") { id } }
            fragment PetFields on Pet { id }
        "#;
        let doc = parse(source).unwrap();

        let kinds: Vec<_> = doc.definitions().iter().map(|def| def.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DefinitionKind::Schema,
                DefinitionKind::ObjectType,
                DefinitionKind::InterfaceType,
                DefinitionKind::InputObjectType,
                DefinitionKind::Scalar,
                DefinitionKind::Enum,
                DefinitionKind::Union,
                DefinitionKind::Directive,
                DefinitionKind::ObjectTypeExtension,
                DefinitionKind::SchemaExtension,
                DefinitionKind::Operation,
                DefinitionKind::Fragment,
            ]
        );

        let names: Vec<_> = doc.defined_names().collect();
        assert_eq!(
            names,
            vec![
                "Query",
                "Node",
                "PetInput",
                "DateTime",
                "Status",
                "SearchResult",
                "auth",
                "Pet",
                "GetPet",
                "PetFields"
            ]
        );
    }

    #[test]
    fn test_fields_keep_wrappers_and_directives() {
        let source = r"
            type Query {
                pets: [Pet!]! @auth @cached
                owner: Owner
            }
        ";
        let doc = parse(source).unwrap();
        let fields = &doc.definitions()[0].fields;

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "pets");
        assert_eq!(fields[0].ty.to_string(), "[Pet!]!");
        assert_eq!(fields[0].directives, vec!["auth", "cached"]);
        assert_eq!(fields[1].ty, TypeRef::Named("Owner".to_string()));
    }

    #[test]
    fn test_schema_definition_bindings() {
        let doc = parse("schema { query: Root mutation: Mut }").unwrap();
        let schema = &doc.definitions()[0];
        assert_eq!(schema.name, None);
        assert_eq!(schema.root_operations.len(), 2);
        assert_eq!(schema.root_operations[0].operation, OperationType::Query);
        assert_eq!(schema.root_operations[1].type_name, "Mut");
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = parse("type Query { pet: }").unwrap_err();
        assert!(!err.errors.is_empty());
        assert!(err.to_string().starts_with("syntax error:"));
    }

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(parse("").is_err());
        assert!(parse("   \n\t").is_err());
        assert!(parse("# only a comment\n").is_err());
    }

    #[test]
    fn test_defines_directive() {
        let doc = parse("directive @auth on FIELD_DEFINITION\ntype auth { a: Int }").unwrap();
        assert!(doc.defines_directive("auth"));
        assert!(doc.defines("auth"));
        assert!(!doc.defines_directive("cached"));
    }

    #[test]
    fn test_extensions_carry_no_fields() {
        let doc = parse(
            "extend type Pet { owner: Owner }\n\
             extend interface Node { id: ID }\n\
             extend input PetInput { tag: Tag }",
        )
        .unwrap();

        assert_eq!(doc.definitions().len(), 3);
        assert!(doc.definitions().iter().all(|def| def.kind.is_extension()));
        assert!(doc.definitions().iter().all(|def| def.fields.is_empty()));
    }
}
