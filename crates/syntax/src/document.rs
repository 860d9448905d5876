use graphql_apollo_ext::RootOperationBinding;

/// The kind of a top-level definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    ObjectType,
    InterfaceType,
    InputObjectType,
    Scalar,
    Enum,
    Union,
    Directive,
    Schema,
    Operation,
    Fragment,
    ObjectTypeExtension,
    InterfaceTypeExtension,
    InputObjectTypeExtension,
    ScalarExtension,
    EnumExtension,
    UnionExtension,
    SchemaExtension,
}

impl DefinitionKind {
    /// Scalar, object, interface, union, enum or input-object definitions.
    /// Extensions and directive definitions are not type definitions.
    #[must_use]
    pub const fn is_type_definition(self) -> bool {
        matches!(
            self,
            Self::ObjectType
                | Self::InterfaceType
                | Self::InputObjectType
                | Self::Scalar
                | Self::Enum
                | Self::Union
        )
    }

    /// Object, interface and input-object definitions (not their extensions).
    #[must_use]
    pub const fn is_field_bearing(self) -> bool {
        matches!(
            self,
            Self::ObjectType | Self::InterfaceType | Self::InputObjectType
        )
    }

    #[must_use]
    pub const fn is_directive(self) -> bool {
        matches!(self, Self::Directive)
    }

    /// Schema definitions and schema extensions.
    #[must_use]
    pub const fn is_schema(self) -> bool {
        matches!(self, Self::Schema | Self::SchemaExtension)
    }

    /// Operations and fragments.
    #[must_use]
    pub const fn is_executable(self) -> bool {
        matches!(self, Self::Operation | Self::Fragment)
    }

    #[must_use]
    pub const fn is_extension(self) -> bool {
        matches!(
            self,
            Self::ObjectTypeExtension
                | Self::InterfaceTypeExtension
                | Self::InputObjectTypeExtension
                | Self::ScalarExtension
                | Self::EnumExtension
                | Self::UnionExtension
                | Self::SchemaExtension
        )
    }
}

/// A type reference as written on a field: `Foo`, `[Foo]`, `Foo!`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// The named type at the bottom of all list/non-null wrappers.
    #[must_use]
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.innermost_name(),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// A field of an object, interface or input-object definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeRef,
    /// Names of the directives applied to this field, in source order.
    pub directives: Vec<String>,
}

/// One top-level definition of a [`ParsedDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub kind: DefinitionKind,
    /// `None` for schema definitions/extensions and anonymous operations.
    pub name: Option<String>,
    /// Populated for field-bearing definitions only; extensions carry none.
    pub fields: Vec<FieldDefinition>,
    /// Populated for schema definitions.
    pub root_operations: Vec<RootOperationBinding>,
}

impl Definition {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// A parsed GraphQL document: its definitions in source order.
///
/// Always derived from a complete source text; there is no API to patch the
/// definition list in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    definitions: Vec<Definition>,
}

impl ParsedDocument {
    pub(crate) const fn new(definitions: Vec<Definition>) -> Self {
        Self { definitions }
    }

    #[must_use]
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Definitions whose kind satisfies `predicate`, in source order.
    ///
    /// ```
    /// use graphql_syntax::{parse, DefinitionKind};
    ///
    /// let doc = parse("type Query { a: Int } directive @auth on FIELD_DEFINITION").unwrap();
    /// assert_eq!(doc.definitions_of_kind(DefinitionKind::is_directive).count(), 1);
    /// ```
    pub fn definitions_of_kind<P>(&self, predicate: P) -> impl Iterator<Item = &Definition>
    where
        P: Fn(DefinitionKind) -> bool,
    {
        self.definitions
            .iter()
            .filter(move |def| predicate(def.kind))
    }

    /// Names of every named definition, of any kind, in source order.
    pub fn defined_names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().filter_map(Definition::name)
    }

    /// Whether any definition (of any kind) carries `name`.
    #[must_use]
    pub fn defines(&self, name: &str) -> bool {
        self.definitions.iter().any(|def| def.has_name(name))
    }

    /// Whether the document contains a directive definition named `name`.
    #[must_use]
    pub fn defines_directive(&self, name: &str) -> bool {
        self.definitions_of_kind(DefinitionKind::is_directive)
            .any(|def| def.has_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_display() {
        let ty = TypeRef::NonNull(Box::new(TypeRef::List(Box::new(TypeRef::NonNull(
            Box::new(TypeRef::Named("Foo".to_string())),
        )))));
        assert_eq!(ty.to_string(), "[Foo!]!");
        assert_eq!(ty.innermost_name(), "Foo");
    }

    #[test]
    fn test_kind_predicates_are_disjoint_where_expected() {
        for kind in [
            DefinitionKind::ObjectTypeExtension,
            DefinitionKind::Directive,
            DefinitionKind::Schema,
            DefinitionKind::Operation,
        ] {
            assert!(!kind.is_type_definition(), "{kind:?}");
            assert!(!kind.is_field_bearing(), "{kind:?}");
        }
        assert!(DefinitionKind::InputObjectType.is_field_bearing());
        assert!(!DefinitionKind::Union.is_field_bearing());
        assert!(DefinitionKind::SchemaExtension.is_schema());
        assert!(DefinitionKind::SchemaExtension.is_extension());
        assert!(DefinitionKind::Fragment.is_executable());
    }
}
