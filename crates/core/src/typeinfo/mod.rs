//! Type-information boundary
//!
//! The interface builder never inspects source code itself. It walks a type graph
//! exposed through [`TypeInfoProvider`]. [`TypeUniverse`] is an in-memory arena
//! implementing the provider, and [`TypeCatalog`] loads one from a JSON or YAML
//! document.
//!
//! ## Example
//!
//! ```rust
//! use shapegen_core::typeinfo::{Signature, TypeInfoProvider, TypeUniverse};
//!
//! let mut universe = TypeUniverse::new();
//! let int = universe.basic("int");
//! let counter = universe.declare_named("example.com/stats", "stats", "Counter");
//! let underlying = universe.struct_type(Vec::new());
//! universe.set_underlying(counter, underlying);
//! universe.add_method(counter, "Add", Signature::new(vec![int], vec![]));
//!
//! assert_eq!(universe.lookup("example.com/stats", "Counter"), Some(counter));
//! assert_eq!(universe.type_string(counter), "example.com/stats.Counter");
//! ```

mod catalog;
mod error;
mod universe;

pub use catalog::{
    FieldDecl, MethodDecl, PackageDecl, ParamDecl, TypeCatalog, TypeDecl, TypeExpr,
};
pub use error::{CatalogError, CatalogResult};
pub use universe::TypeUniverse;

use serde::{Deserialize, Serialize};

/// Handle to a type stored by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeRef(pub(crate) usize);

impl TypeRef {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Package that defines a named type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageRef {
    /// Package name as used in qualified identifiers (`http`)
    pub name: String,
    /// Import path (`net/http`)
    pub path: String,
}

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// A parameter or result of a signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeRef,
}

impl Param {
    pub fn unnamed(ty: TypeRef) -> Self {
        Self { name: None, ty }
    }
}

/// A function or method signature
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
    /// The last parameter is a `...T` parameter (its type is `[]T`)
    pub variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<TypeRef>, results: Vec<TypeRef>) -> Self {
        Self {
            params: params.into_iter().map(Param::unnamed).collect(),
            results: results.into_iter().map(Param::unnamed).collect(),
            variadic: false,
        }
    }

    pub fn with_variadic(mut self, variadic: bool) -> Self {
        self.variadic = variadic;
        self
    }
}

/// A declared method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub signature: Signature,
}

/// A struct member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub ty: TypeRef,
    /// Anonymous (embedded) field
    pub embedded: bool,
}

/// A type introduced under an explicit identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    /// `None` for predeclared named types such as `error`
    pub package: Option<PackageRef>,
    pub type_args: Vec<TypeRef>,
    /// `None` while the declaration is still being resolved, or for opaque types
    pub underlying: Option<TypeRef>,
    pub methods: Vec<Method>,
    /// Generic type this is an instance of. Instances carry no underlying type
    /// or methods of their own; both are read through the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<TypeRef>,
}

/// Structural kind of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Basic(String),
    Interface(Vec<Method>),
    Struct(Vec<StructField>),
    Signature(Signature),
    Named(NamedType),
    Pointer(TypeRef),
    Slice(TypeRef),
    Array { len: u64, elem: TypeRef },
    Chan { dir: ChanDir, elem: TypeRef },
    Map { key: TypeRef, value: TypeRef },
}

impl TypeKind {
    /// Element type of a pointer or composite
    pub fn elem(&self) -> Option<TypeRef> {
        match self {
            TypeKind::Pointer(elem) | TypeKind::Slice(elem) => Some(*elem),
            TypeKind::Array { elem, .. } | TypeKind::Chan { elem, .. } => Some(*elem),
            TypeKind::Map { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Map, slice, array or channel
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            TypeKind::Slice(_)
                | TypeKind::Array { .. }
                | TypeKind::Chan { .. }
                | TypeKind::Map { .. }
        )
    }
}

/// Supplies type information for a loaded set of packages.
///
/// Implementations must not impose their own recursion limit: the interface
/// builder enforces a single depth guard.
pub trait TypeInfoProvider {
    /// Find the named type declared as `type_name` in `package`
    fn lookup(&self, package: &str, type_name: &str) -> Option<TypeRef>;

    /// Structural kind of a type
    fn kind(&self, ty: TypeRef) -> &TypeKind;

    /// Canonical rendering of a type with fully qualified import paths,
    /// e.g. `map[string]*net/http.Client`
    fn type_string(&self, ty: TypeRef) -> String;

    /// The generic declaration behind an instantiated named type, or `ty` itself
    fn origin(&self, ty: TypeRef) -> TypeRef {
        match self.kind(ty) {
            TypeKind::Named(NamedType {
                origin: Some(origin),
                ..
            }) => *origin,
            _ => ty,
        }
    }
}
