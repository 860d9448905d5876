//! Uniform access to the fields of field-bearing definitions.
//!
//! Object and interface types hold `FieldDefinition`s while input objects hold
//! `InputValueDefinition`s. Reference extraction only needs the field name, its
//! type reference, and the directives applied to it, so both are flattened into
//! [`FieldNode`].

use apollo_parser::cst;

use crate::NameExt;

/// A field of an object, interface, or input-object definition.
#[derive(Debug, Clone)]
pub struct FieldNode {
    pub name: Option<String>,
    pub ty: Option<cst::Type>,
    /// Names of directives applied to the field, in source order.
    pub directives: Vec<String>,
}

/// Collect directive names from an optional directive list.
#[must_use]
pub fn directive_names(directives: Option<cst::Directives>) -> Vec<String> {
    directives
        .map(|list| {
            list.directives()
                .filter_map(|dir| dir.name_text())
                .collect()
        })
        .unwrap_or_default()
}

/// Extension trait for definitions that carry fields.
pub trait FieldsExt {
    /// The definition's fields in source order.
    fn field_nodes(&self) -> Vec<FieldNode>;
}

fn from_fields_definition(fields: Option<cst::FieldsDefinition>) -> Vec<FieldNode> {
    fields
        .map(|fields| {
            fields
                .field_definitions()
                .map(|field| FieldNode {
                    name: field.name_text(),
                    ty: field.ty(),
                    directives: directive_names(field.directives()),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn from_input_fields_definition(fields: Option<cst::InputFieldsDefinition>) -> Vec<FieldNode> {
    fields
        .map(|fields| {
            fields
                .input_value_definitions()
                .map(|field| FieldNode {
                    name: field.name_text(),
                    ty: field.ty(),
                    directives: directive_names(field.directives()),
                })
                .collect()
        })
        .unwrap_or_default()
}

impl FieldsExt for cst::ObjectTypeDefinition {
    fn field_nodes(&self) -> Vec<FieldNode> {
        from_fields_definition(self.fields_definition())
    }
}

impl FieldsExt for cst::InterfaceTypeDefinition {
    fn field_nodes(&self) -> Vec<FieldNode> {
        from_fields_definition(self.fields_definition())
    }
}

impl FieldsExt for cst::InputObjectTypeDefinition {
    fn field_nodes(&self) -> Vec<FieldNode> {
        from_input_fields_definition(self.input_fields_definition())
    }
}
