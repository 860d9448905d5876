//! Type-reference helpers.
//!
//! `apollo-parser` models `Foo!` and `[Foo]!` as a `NonNullType` holding either a
//! `NamedType` or a `ListType`. [`TypeExt::layer`] hides that asymmetry so callers
//! can peel one wrapper at a time.

use apollo_parser::cst;

use crate::NameExt;

/// One layer of a type reference.
#[derive(Debug, Clone)]
pub enum TypeLayer {
    /// A bare named type (`Foo`).
    Named(String),
    /// A list wrapper (`[T]`), holding the inner type.
    List(cst::Type),
    /// A non-null wrapper (`T!`), holding the inner type.
    NonNull(cst::Type),
}

/// Extension trait for type references.
pub trait TypeExt {
    /// Peel the outermost wrapper off this type reference.
    ///
    /// Returns `None` when the CST is incomplete (only possible for inputs with
    /// syntax errors).
    fn layer(&self) -> Option<TypeLayer>;

    /// Strip every list/non-null wrapper and return the innermost named type.
    fn innermost_name(&self) -> Option<String> {
        match self.layer()? {
            TypeLayer::Named(name) => Some(name),
            TypeLayer::List(inner) | TypeLayer::NonNull(inner) => inner.innermost_name(),
        }
    }
}

impl TypeExt for cst::Type {
    fn layer(&self) -> Option<TypeLayer> {
        match self {
            Self::NamedType(named) => named.name_text().map(TypeLayer::Named),
            Self::ListType(list) => list.ty().map(TypeLayer::List),
            Self::NonNullType(non_null) => {
                if let Some(named) = non_null.named_type() {
                    Some(TypeLayer::NonNull(Self::NamedType(named)))
                } else {
                    non_null
                        .list_type()
                        .map(|list| TypeLayer::NonNull(Self::ListType(list)))
                }
            }
        }
    }
}
