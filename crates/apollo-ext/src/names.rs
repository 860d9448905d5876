//! Name extraction utilities for GraphQL CST nodes.
//!
//! This module provides extension traits that make it easier to extract
//! names from CST nodes without long option chains.
//!
//! # Example
//!
//! ```
//! use graphql_apollo_ext::{DefinitionExt, NameExt};
//! use apollo_parser::Parser;
//!
//! let source = "fragment PetFields on Pet { name }";
//! let tree = Parser::new(source).parse();
//!
//! for def in tree.document().definitions() {
//!     // Instead of: frag.fragment_name().and_then(|n| n.name()).map(|n| n.text().to_string())
//!     assert_eq!(def.definition_name(), Some("PetFields".to_string()));
//! }
//! ```

use apollo_parser::cst;

/// Extension trait for extracting names from CST nodes.
pub trait NameExt {
    /// Get the name text as a String, if available.
    fn name_text(&self) -> Option<String>;
}

macro_rules! impl_name_ext {
    ($($node:ty),* $(,)?) => {
        $(
            impl NameExt for $node {
                fn name_text(&self) -> Option<String> {
                    self.name().map(|n| n.text().to_string())
                }
            }
        )*
    };
}

impl_name_ext!(
    cst::OperationDefinition,
    cst::ObjectTypeDefinition,
    cst::InterfaceTypeDefinition,
    cst::InputObjectTypeDefinition,
    cst::ScalarTypeDefinition,
    cst::EnumTypeDefinition,
    cst::UnionTypeDefinition,
    cst::DirectiveDefinition,
    cst::ObjectTypeExtension,
    cst::InterfaceTypeExtension,
    cst::InputObjectTypeExtension,
    cst::ScalarTypeExtension,
    cst::EnumTypeExtension,
    cst::UnionTypeExtension,
    cst::FieldDefinition,
    cst::InputValueDefinition,
    cst::NamedType,
    cst::Directive,
);

impl NameExt for cst::FragmentDefinition {
    fn name_text(&self) -> Option<String> {
        self.fragment_name()
            .and_then(|n| n.name())
            .map(|n| n.text().to_string())
    }
}

/// Extension trait giving every top-level definition a uniform name accessor.
pub trait DefinitionExt {
    /// The definition's name. Schema definitions, schema extensions and
    /// anonymous operations have none.
    fn definition_name(&self) -> Option<String>;
}

impl DefinitionExt for cst::Definition {
    fn definition_name(&self) -> Option<String> {
        match self {
            Self::OperationDefinition(op) => op.name_text(),
            Self::FragmentDefinition(frag) => frag.name_text(),
            Self::DirectiveDefinition(dir) => dir.name_text(),
            Self::ObjectTypeDefinition(obj) => obj.name_text(),
            Self::InterfaceTypeDefinition(iface) => iface.name_text(),
            Self::InputObjectTypeDefinition(input) => input.name_text(),
            Self::ScalarTypeDefinition(scalar) => scalar.name_text(),
            Self::EnumTypeDefinition(enum_def) => enum_def.name_text(),
            Self::UnionTypeDefinition(union) => union.name_text(),
            Self::ObjectTypeExtension(ext) => ext.name_text(),
            Self::InterfaceTypeExtension(ext) => ext.name_text(),
            Self::InputObjectTypeExtension(ext) => ext.name_text(),
            Self::ScalarTypeExtension(ext) => ext.name_text(),
            Self::EnumTypeExtension(ext) => ext.name_text(),
            Self::UnionTypeExtension(ext) => ext.name_text(),
            Self::SchemaDefinition(_) | Self::SchemaExtension(_) => None,
        }
    }
}
