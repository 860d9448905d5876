//! Lowering from the `apollo-parser` CST into the owned document model.

use apollo_parser::cst;
use graphql_apollo_ext::{
    DefinitionExt, FieldNode, FieldsExt, SchemaDefinitionExt, TypeExt, TypeLayer,
};

use crate::{Definition, DefinitionKind, FieldDefinition, TypeRef};

pub(crate) fn lower_definition(def: &cst::Definition) -> Definition {
    let name = def.definition_name();
    let mut fields = Vec::new();
    let mut root_operations = Vec::new();

    let kind = match def {
        cst::Definition::ObjectTypeDefinition(obj) => {
            fields = lower_fields(obj.field_nodes());
            DefinitionKind::ObjectType
        }
        cst::Definition::InterfaceTypeDefinition(iface) => {
            fields = lower_fields(iface.field_nodes());
            DefinitionKind::InterfaceType
        }
        cst::Definition::InputObjectTypeDefinition(input) => {
            fields = lower_fields(input.field_nodes());
            DefinitionKind::InputObjectType
        }
        cst::Definition::ObjectTypeExtension(_) => DefinitionKind::ObjectTypeExtension,
        cst::Definition::InterfaceTypeExtension(_) => DefinitionKind::InterfaceTypeExtension,
        cst::Definition::InputObjectTypeExtension(_) => DefinitionKind::InputObjectTypeExtension,
        cst::Definition::SchemaDefinition(schema) => {
            root_operations = schema.root_operation_bindings();
            DefinitionKind::Schema
        }
        cst::Definition::ScalarTypeDefinition(_) => DefinitionKind::Scalar,
        cst::Definition::EnumTypeDefinition(_) => DefinitionKind::Enum,
        cst::Definition::UnionTypeDefinition(_) => DefinitionKind::Union,
        cst::Definition::DirectiveDefinition(_) => DefinitionKind::Directive,
        cst::Definition::OperationDefinition(_) => DefinitionKind::Operation,
        cst::Definition::FragmentDefinition(_) => DefinitionKind::Fragment,
        cst::Definition::ScalarTypeExtension(_) => DefinitionKind::ScalarExtension,
        cst::Definition::EnumTypeExtension(_) => DefinitionKind::EnumExtension,
        cst::Definition::UnionTypeExtension(_) => DefinitionKind::UnionExtension,
        cst::Definition::SchemaExtension(_) => DefinitionKind::SchemaExtension,
    };

    Definition {
        kind,
        name,
        fields,
        root_operations,
    }
}

// Only called on error-free trees, where every field has a name and a type.
fn lower_fields(nodes: Vec<FieldNode>) -> Vec<FieldDefinition> {
    nodes
        .into_iter()
        .filter_map(|node| {
            Some(FieldDefinition {
                name: node.name?,
                ty: lower_type(&node.ty?)?,
                directives: node.directives,
            })
        })
        .collect()
}

fn lower_type(ty: &cst::Type) -> Option<TypeRef> {
    match ty.layer()? {
        TypeLayer::Named(name) => Some(TypeRef::Named(name)),
        TypeLayer::List(inner) => lower_type(&inner).map(|t| TypeRef::List(Box::new(t))),
        TypeLayer::NonNull(inner) => lower_type(&inner).map(|t| TypeRef::NonNull(Box::new(t))),
    }
}
