//! Method-set collection across embedded types

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::typeinfo::{Method, TypeInfoProvider, TypeKind, TypeRef};

use super::config::MAX_DEPTH;
use super::error::{InterfaceError, InterfaceResult};

/// Flattened method table keyed by method name, iterated in name order
pub type MethodTable<'p> = BTreeMap<String, &'p Method>;

/// Collect the methods of a named type, including those promoted from embedded
/// struct fields.
///
/// The type's own methods are inserted first, then embedded members are walked
/// depth-first in declaration order. A name that is already present is never
/// replaced, so a method found closer to the root shadows deeper ones.
pub fn collect_methods<'p, P: TypeInfoProvider + ?Sized>(
    provider: &'p P,
    named: TypeRef,
) -> InterfaceResult<MethodTable<'p>> {
    let mut methods = MethodTable::new();
    collect_into(provider, &mut methods, named, 0, named)?;
    Ok(methods)
}

fn collect_into<'p, P: TypeInfoProvider + ?Sized>(
    provider: &'p P,
    methods: &mut MethodTable<'p>,
    ty: TypeRef,
    depth: usize,
    orig: TypeRef,
) -> InterfaceResult<()> {
    if depth > MAX_DEPTH {
        return Err(InterfaceError::RecursionLimitExceeded {
            type_name: provider.type_string(orig),
            limit: MAX_DEPTH,
        });
    }
    // Instances of generic types share the declaration of their origin.
    let TypeKind::Named(named) = provider.kind(provider.origin(ty)) else {
        return Ok(());
    };

    for method in &named.methods {
        match methods.entry(method.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(method);
            }
            Entry::Occupied(_) => {
                tracing::trace!(
                    method = %method.name,
                    depth,
                    "Method shadowed by shallower declaration"
                );
            }
        }
    }

    let Some(underlying) = named.underlying else {
        return Ok(());
    };
    let TypeKind::Struct(fields) = provider.kind(underlying) else {
        return Ok(());
    };
    for field in fields.iter().filter(|f| f.embedded) {
        let mut embedded = field.ty;
        if let TypeKind::Pointer(elem) = provider.kind(embedded) {
            embedded = *elem;
        }
        if matches!(provider.kind(embedded), TypeKind::Named(_)) {
            collect_into(provider, methods, embedded, depth + 1, orig)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeinfo::{Signature, StructField, TypeUniverse};

    fn embed(ty: TypeRef) -> StructField {
        StructField {
            name: String::new(),
            ty,
            embedded: true,
        }
    }

    #[test]
    fn test_own_methods() {
        let mut u = TypeUniverse::new();
        let t = u.declare_named("example.com/p", "p", "T");
        u.add_method(t, "B", Signature::default());
        u.add_method(t, "A", Signature::default());
        let methods = collect_methods(&u, t).unwrap();
        let names: Vec<&str> = methods.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_embedded_pointer_methods_promoted() {
        let mut u = TypeUniverse::new();
        let bar = u.declare_named("example.com/p", "p", "Bar");
        u.add_method(bar, "A", Signature::default());
        let bar_ptr = u.pointer(bar);
        let baz = u.declare_named("example.com/p", "p", "Baz");
        let st = u.struct_type(vec![embed(bar_ptr)]);
        u.set_underlying(baz, st);
        u.add_method(baz, "D", Signature::default());

        let methods = collect_methods(&u, baz).unwrap();
        assert!(methods.contains_key("A"));
        assert!(methods.contains_key("D"));
    }

    #[test]
    fn test_non_embedded_fields_ignored() {
        let mut u = TypeUniverse::new();
        let bar = u.declare_named("example.com/p", "p", "Bar");
        u.add_method(bar, "A", Signature::default());
        let baz = u.declare_named("example.com/p", "p", "Baz");
        let st = u.struct_type(vec![StructField {
            name: "bar".into(),
            ty: bar,
            embedded: false,
        }]);
        u.set_underlying(baz, st);
        assert!(collect_methods(&u, baz).unwrap().is_empty());
    }

    #[test]
    fn test_outer_declaration_shadows_embedded() {
        let mut u = TypeUniverse::new();
        let int = u.basic("int");
        let string = u.basic("string");

        let left = u.declare_named("example.com/p", "p", "Left");
        u.add_method(left, "Name", Signature::new(vec![], vec![int]));
        let right = u.declare_named("example.com/p", "p", "Right");
        u.add_method(right, "Name", Signature::new(vec![int], vec![int]));

        let outer = u.declare_named("example.com/p", "p", "Outer");
        let st = u.struct_type(vec![embed(left), embed(right)]);
        u.set_underlying(outer, st);
        u.add_method(outer, "Name", Signature::new(vec![], vec![string]));

        let methods = collect_methods(&u, outer).unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods["Name"].signature.results[0].ty, string);
    }

    #[test]
    fn test_first_embedded_wins_without_outer() {
        let mut u = TypeUniverse::new();
        let int = u.basic("int");
        let string = u.basic("string");
        let left = u.declare_named("example.com/p", "p", "Left");
        u.add_method(left, "Name", Signature::new(vec![], vec![int]));
        let right = u.declare_named("example.com/p", "p", "Right");
        u.add_method(right, "Name", Signature::new(vec![], vec![string]));
        let outer = u.declare_named("example.com/p", "p", "Outer");
        let st = u.struct_type(vec![embed(left), embed(right)]);
        u.set_underlying(outer, st);

        let methods = collect_methods(&u, outer).unwrap();
        assert_eq!(methods["Name"].signature.results[0].ty, int);
    }

    #[test]
    fn test_mutual_embedding_hits_recursion_limit() {
        let mut u = TypeUniverse::new();
        let a = u.declare_named("example.com/p", "p", "A");
        let b = u.declare_named("example.com/p", "p", "B");
        let a_ptr = u.pointer(a);
        let b_ptr = u.pointer(b);
        let a_struct = u.struct_type(vec![embed(b_ptr)]);
        let b_struct = u.struct_type(vec![embed(a_ptr)]);
        u.set_underlying(a, a_struct);
        u.set_underlying(b, b_struct);

        let err = collect_methods(&u, a).unwrap_err();
        match err {
            InterfaceError::RecursionLimitExceeded { type_name, limit } => {
                assert_eq!(type_name, "example.com/p.A");
                assert_eq!(limit, MAX_DEPTH);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
