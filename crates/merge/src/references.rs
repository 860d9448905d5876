//! Reference extraction: which types and directives a document uses on its
//! fields without defining them.
//!
//! Only fields of object, interface and input-object definitions are
//! inspected. Arguments, union members, implemented interfaces and type
//! extensions do not contribute references.

use std::collections::HashSet;

use graphql_syntax::{DefinitionKind, ParsedDocument};

/// Scalars every GraphQL schema provides without a definition.
pub const BUILTIN_SCALARS: &[&str] = &["String", "Boolean", "Int", "Float", "ID"];

/// What a field refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Referenced {
    /// The field's innermost named type.
    Type(String),
    /// A directive applied to the field.
    Directive(String),
}

/// A single reference made by a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference {
    /// Name of the definition owning the field.
    pub owner: String,
    pub field: String,
    pub referenced: Referenced,
}

/// Every reference made by fields of object, interface and input-object
/// definitions, in source order. For each field the type reference comes
/// first, followed by its directives.
#[must_use]
pub fn field_references(doc: &ParsedDocument) -> Vec<FieldReference> {
    let mut references = Vec::new();

    for def in doc.definitions_of_kind(DefinitionKind::is_field_bearing) {
        let owner = def.name().unwrap_or_default();
        for field in &def.fields {
            references.push(FieldReference {
                owner: owner.to_string(),
                field: field.name.clone(),
                referenced: Referenced::Type(field.ty.innermost_name().to_string()),
            });
            references.extend(field.directives.iter().map(|directive| FieldReference {
                owner: owner.to_string(),
                field: field.name.clone(),
                referenced: Referenced::Directive(directive.clone()),
            }));
        }
    }

    references
}

/// Type names referenced by fields but not defined in `doc`, in first-seen
/// order without duplicates.
///
/// A name counts as defined when any definition of any kind carries it.
/// Built-in scalars are never reported.
#[must_use]
pub fn undefined_type_names(doc: &ParsedDocument) -> Vec<String> {
    let defined: HashSet<&str> = doc.defined_names().collect();
    let mut undefined: Vec<String> = Vec::new();

    for reference in field_references(doc) {
        let Referenced::Type(name) = reference.referenced else {
            continue;
        };
        if defined.contains(name.as_str())
            || BUILTIN_SCALARS.contains(&name.as_str())
            || undefined.contains(&name)
        {
            continue;
        }
        undefined.push(name);
    }

    undefined
}

/// Directive names applied to fields but without a directive definition in
/// `doc`.
///
/// This is a set; it is returned in first-seen order so that resolution is
/// deterministic.
#[must_use]
pub fn undefined_directive_names(doc: &ParsedDocument) -> Vec<String> {
    let defined: HashSet<&str> = doc
        .definitions_of_kind(DefinitionKind::is_directive)
        .filter_map(|def| def.name())
        .collect();
    let mut undefined: Vec<String> = Vec::new();

    for reference in field_references(doc) {
        let Referenced::Directive(name) = reference.referenced else {
            continue;
        };
        if !defined.contains(name.as_str()) && !undefined.contains(&name) {
            undefined.push(name);
        }
    }

    undefined
}
