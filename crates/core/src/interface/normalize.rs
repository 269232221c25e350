//! Conversion of provider types into [`Type`] values

use crate::models::Type;
use crate::typeinfo::{NamedType, TypeInfoProvider, TypeKind, TypeRef};

use super::config::MAX_DEPTH;
use super::error::{InterfaceError, InterfaceResult};

/// Converts provider type handles into [`Type`] records.
///
/// The descent is first-write-wins: once a field is set by an outer layer
/// (e.g. the name of a named wrapper or the canonical string of a composite),
/// inner layers never overwrite it.
pub struct Normalizer<'p, P: TypeInfoProvider + ?Sized> {
    provider: &'p P,
}

impl<'p, P: TypeInfoProvider + ?Sized> Normalizer<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Normalize a type at depth 0
    pub fn normalize(&self, ty: TypeRef) -> InterfaceResult<Type> {
        let mut typ = Type::default();
        self.set_from_type(&mut typ, ty, Depth::root(), ty)?;
        Ok(typ)
    }

    fn set_from_type(
        &self,
        typ: &mut Type,
        ty: TypeRef,
        depth: Depth,
        orig: TypeRef,
    ) -> InterfaceResult<()> {
        if depth.current > MAX_DEPTH {
            return Err(InterfaceError::RecursionLimitExceeded {
                type_name: self.provider.type_string(orig),
                limit: MAX_DEPTH,
            });
        }
        match self.provider.kind(ty) {
            TypeKind::Basic(name) => set_name(typ, || name.clone()),
            TypeKind::Interface(_) | TypeKind::Struct(_) => {
                set_name(typ, || self.provider.type_string(ty))
            }
            TypeKind::Signature(_) => {
                typ.is_func = true;
                set_name(typ, || self.provider.type_string(ty));
            }
            TypeKind::Named(named) => self.set_from_named(typ, named, depth, orig)?,
            TypeKind::Pointer(elem) => {
                // Only the outermost pointer is recorded; nested ones stay in the name.
                if depth.is_top() {
                    typ.is_pointer = true;
                }
                self.set_from_type(typ, *elem, depth.next(), orig)?;
            }
            TypeKind::Map { key, value } => {
                self.set_from_composite(typ, ty, *value, depth, orig)?;
                self.set_from_type(typ, *key, depth.next(), orig)?;
            }
            TypeKind::Slice(elem)
            | TypeKind::Array { elem, .. }
            | TypeKind::Chan { elem, .. } => {
                self.set_from_composite(typ, ty, *elem, depth, orig)?;
            }
        }
        Ok(())
    }

    fn set_from_named(
        &self,
        typ: &mut Type,
        named: &NamedType,
        depth: Depth,
        orig: TypeRef,
    ) -> InterfaceResult<()> {
        if typ.name.is_empty() {
            typ.name = if named.type_args.is_empty() {
                named.name.clone()
            } else {
                let mut args = Vec::with_capacity(named.type_args.len());
                for arg in &named.type_args {
                    let mut arg_type = Type::default();
                    self.set_from_type(&mut arg_type, *arg, depth.nested_root(), orig)?;
                    args.push(arg_type.to_string());
                }
                format!("{}[{}]", named.name, args.join(", "))
            };
        }
        if !typ.package.is_empty() || !typ.import_path.is_empty() {
            return Ok(());
        }
        if let Some(pkg) = &named.package {
            typ.package = pkg.name.clone();
            typ.import_path = pkg.path.clone();
        }
        Ok(())
    }

    fn set_from_composite(
        &self,
        typ: &mut Type,
        ty: TypeRef,
        elem: TypeRef,
        depth: Depth,
        orig: TypeRef,
    ) -> InterfaceResult<()> {
        typ.is_composite = true;
        set_name(typ, || self.provider.type_string(ty));
        self.set_from_type(typ, elem, depth.next(), orig)
    }
}

/// Traversal depth, plus the depth at which the [`Type`] being filled is rooted.
/// Generic arguments are rooted below their named type but share its budget.
#[derive(Debug, Clone, Copy)]
struct Depth {
    current: usize,
    top: usize,
}

impl Depth {
    fn root() -> Self {
        Self { current: 0, top: 0 }
    }

    fn next(self) -> Self {
        Self {
            current: self.current + 1,
            top: self.top,
        }
    }

    fn nested_root(self) -> Self {
        Self {
            current: self.current + 1,
            top: self.current + 1,
        }
    }

    fn is_top(self) -> bool {
        self.current == self.top
    }
}

fn set_name(typ: &mut Type, name: impl FnOnce() -> String) {
    if typ.name.is_empty() {
        typ.name = name();
    }
}
