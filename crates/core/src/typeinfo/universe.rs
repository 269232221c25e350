//! In-memory type graph

use std::collections::HashMap;
use std::fmt::Write;

use super::{
    ChanDir, Method, NamedType, PackageRef, Param, Signature, StructField, TypeInfoProvider,
    TypeKind, TypeRef,
};

/// Rendering stops descending past this depth; only malformed unnamed cycles reach it.
const MAX_RENDER_DEPTH: usize = 256;

/// Suffix of the external test package that shares a directory with a package.
const TEST_PACKAGE_SUFFIX: &str = "_test";

/// Arena of types implementing [`TypeInfoProvider`].
///
/// Named types are declared first and completed later with [`set_underlying`] and
/// [`add_method`], so self-referential and mutually embedding types can be built.
///
/// [`set_underlying`]: TypeUniverse::set_underlying
/// [`add_method`]: TypeUniverse::add_method
#[derive(Debug, Clone, Default)]
pub struct TypeUniverse {
    types: Vec<TypeKind>,
    named: HashMap<(String, String), TypeRef>,
    basics: HashMap<String, TypeRef>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of types in the arena
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn push(&mut self, kind: TypeKind) -> TypeRef {
        self.types.push(kind);
        TypeRef(self.types.len() - 1)
    }

    /// Intern a predeclared type such as `int`, `string` or `error`
    pub fn basic(&mut self, name: &str) -> TypeRef {
        if let Some(&ty) = self.basics.get(name) {
            return ty;
        }
        let ty = self.push(TypeKind::Basic(name.to_string()));
        self.basics.insert(name.to_string(), ty);
        ty
    }

    /// Declare a named type in a package, returning the existing handle if it was
    /// already declared.
    pub fn declare_named(&mut self, path: &str, package: &str, name: &str) -> TypeRef {
        let key = (path.to_string(), name.to_string());
        if let Some(&ty) = self.named.get(&key) {
            return ty;
        }
        let ty = self.push(TypeKind::Named(NamedType {
            name: name.to_string(),
            package: Some(PackageRef {
                name: package.to_string(),
                path: path.to_string(),
            }),
            type_args: Vec::new(),
            underlying: None,
            methods: Vec::new(),
            origin: None,
        }));
        self.named.insert(key, ty);
        ty
    }

    /// Get a declared named type without the test-package fallback
    pub fn get_named(&self, path: &str, name: &str) -> Option<TypeRef> {
        self.named
            .get(&(path.to_string(), name.to_string()))
            .copied()
    }

    /// Instantiate a generic named type with type arguments.
    ///
    /// The instance refers back to the generic, so methods and the underlying
    /// type attached to the generic later are visible through it.
    pub fn instantiate(&mut self, generic: TypeRef, args: Vec<TypeRef>) -> TypeRef {
        match &self.types[generic.0] {
            TypeKind::Named(named) => {
                let instance = NamedType {
                    name: named.name.clone(),
                    package: named.package.clone(),
                    type_args: args,
                    underlying: None,
                    methods: Vec::new(),
                    origin: Some(named.origin.unwrap_or(generic)),
                };
                self.push(TypeKind::Named(instance))
            }
            _ => {
                tracing::warn!(index = generic.0, "Cannot instantiate a non-named type");
                generic
            }
        }
    }

    fn named_mut(&mut self, ty: TypeRef) -> Option<&mut NamedType> {
        match self.types.get_mut(ty.0) {
            Some(TypeKind::Named(named)) => Some(named),
            _ => {
                tracing::warn!(index = ty.0, "Expected a named type");
                None
            }
        }
    }

    /// Attach the underlying type of a declared named type
    pub fn set_underlying(&mut self, named: TypeRef, underlying: TypeRef) {
        if let Some(named) = self.named_mut(named) {
            named.underlying = Some(underlying);
        }
    }

    /// Declare a method on a named type
    pub fn add_method(&mut self, named: TypeRef, name: &str, signature: Signature) {
        if let Some(named) = self.named_mut(named) {
            named.methods.push(Method {
                name: name.to_string(),
                signature,
            });
        }
    }

    pub fn pointer(&mut self, elem: TypeRef) -> TypeRef {
        self.push(TypeKind::Pointer(elem))
    }

    pub fn slice(&mut self, elem: TypeRef) -> TypeRef {
        self.push(TypeKind::Slice(elem))
    }

    pub fn array(&mut self, len: u64, elem: TypeRef) -> TypeRef {
        self.push(TypeKind::Array { len, elem })
    }

    pub fn chan(&mut self, dir: ChanDir, elem: TypeRef) -> TypeRef {
        self.push(TypeKind::Chan { dir, elem })
    }

    pub fn map(&mut self, key: TypeRef, value: TypeRef) -> TypeRef {
        self.push(TypeKind::Map { key, value })
    }

    pub fn signature(&mut self, signature: Signature) -> TypeRef {
        self.push(TypeKind::Signature(signature))
    }

    pub fn struct_type(&mut self, fields: Vec<StructField>) -> TypeRef {
        self.push(TypeKind::Struct(fields))
    }

    pub fn interface_type(&mut self, methods: Vec<Method>) -> TypeRef {
        self.push(TypeKind::Interface(methods))
    }

    /// Overwrite a slot; used to tie unnamed cycles in tests and catalogs.
    pub fn replace(&mut self, ty: TypeRef, kind: TypeKind) {
        self.types[ty.0] = kind;
    }

    fn write_type(&self, out: &mut String, ty: TypeRef, depth: usize) {
        if depth > MAX_RENDER_DEPTH {
            out.push_str("...");
            return;
        }
        match &self.types[ty.0] {
            TypeKind::Basic(name) => out.push_str(name),
            TypeKind::Named(named) => {
                if let Some(pkg) = &named.package {
                    out.push_str(&pkg.path);
                    out.push('.');
                }
                out.push_str(&named.name);
                if !named.type_args.is_empty() {
                    out.push('[');
                    for (i, arg) in named.type_args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write_type(out, *arg, depth + 1);
                    }
                    out.push(']');
                }
            }
            TypeKind::Pointer(elem) => {
                out.push('*');
                self.write_type(out, *elem, depth + 1);
            }
            TypeKind::Slice(elem) => {
                out.push_str("[]");
                self.write_type(out, *elem, depth + 1);
            }
            TypeKind::Array { len, elem } => {
                let _ = write!(out, "[{}]", len);
                self.write_type(out, *elem, depth + 1);
            }
            TypeKind::Chan { dir, elem } => {
                out.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.write_type(out, *elem, depth + 1);
            }
            TypeKind::Map { key, value } => {
                out.push_str("map[");
                self.write_type(out, *key, depth + 1);
                out.push(']');
                self.write_type(out, *value, depth + 1);
            }
            TypeKind::Signature(sig) => {
                out.push_str("func");
                self.write_signature(out, sig, depth + 1);
            }
            TypeKind::Struct(fields) => {
                out.push_str("struct{");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    if !field.embedded {
                        out.push_str(&field.name);
                        out.push(' ');
                    }
                    self.write_type(out, field.ty, depth + 1);
                }
                out.push('}');
            }
            TypeKind::Interface(methods) => {
                out.push_str("interface{");
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(&method.name);
                    self.write_signature(out, &method.signature, depth + 1);
                }
                out.push('}');
            }
        }
    }

    fn write_params(&self, out: &mut String, params: &[Param], variadic: bool, depth: usize) {
        out.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if let Some(name) = &param.name {
                out.push_str(name);
                out.push(' ');
            }
            let last = i + 1 == params.len();
            match (&self.types[param.ty.0], variadic && last) {
                (TypeKind::Slice(elem), true) => {
                    out.push_str("...");
                    self.write_type(out, *elem, depth + 1);
                }
                _ => self.write_type(out, param.ty, depth + 1),
            }
        }
        out.push(')');
    }

    fn write_signature(&self, out: &mut String, sig: &Signature, depth: usize) {
        self.write_params(out, &sig.params, sig.variadic, depth);
        match sig.results.as_slice() {
            [] => {}
            [single] if single.name.is_none() => {
                out.push(' ');
                self.write_type(out, single.ty, depth + 1);
            }
            results => {
                out.push(' ');
                self.write_params(out, results, false, depth);
            }
        }
    }
}

impl TypeInfoProvider for TypeUniverse {
    fn lookup(&self, package: &str, type_name: &str) -> Option<TypeRef> {
        self.get_named(package, type_name).or_else(|| {
            let test_package = format!("{}{}", package, TEST_PACKAGE_SUFFIX);
            let found = self.get_named(&test_package, type_name);
            if found.is_some() {
                tracing::debug!(
                    package = %test_package,
                    type_name,
                    "Resolved type from external test package"
                );
            }
            found
        })
    }

    fn kind(&self, ty: TypeRef) -> &TypeKind {
        &self.types[ty.0]
    }

    fn type_string(&self, ty: TypeRef) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty, 0);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_interned() {
        let mut u = TypeUniverse::new();
        let a = u.basic("int");
        let b = u.basic("int");
        assert_eq!(a, b);
        assert_eq!(u.len(), 1);
    }

    #[test]
    fn test_render_composites() {
        let mut u = TypeUniverse::new();
        let bar = u.declare_named("example.com/sample", "sample", "Bar");
        let ptr = u.pointer(bar);
        let slice = u.slice(ptr);
        assert_eq!(u.type_string(slice), "[]*example.com/sample.Bar");

        let string = u.basic("string");
        let int = u.basic("int");
        let map = u.map(string, int);
        let chan = u.chan(ChanDir::Recv, map);
        assert_eq!(u.type_string(chan), "<-chan map[string]int");

        let arr = u.array(3, string);
        assert_eq!(u.type_string(arr), "[3]string");
    }

    #[test]
    fn test_render_signature() {
        let mut u = TypeUniverse::new();
        let int = u.basic("int");
        let error = u.basic("error");
        let ints = u.slice(int);
        let sig = u.signature(Signature {
            params: vec![
                Param {
                    name: Some("x".into()),
                    ty: int,
                },
                Param {
                    name: Some("rest".into()),
                    ty: ints,
                },
            ],
            results: vec![Param::unnamed(error)],
            variadic: true,
        });
        assert_eq!(u.type_string(sig), "func(x int, rest ...int) error");

        let multi = u.signature(Signature::new(vec![], vec![int, error]));
        assert_eq!(u.type_string(multi), "func() (int, error)");
    }

    #[test]
    fn test_render_generic_instance() {
        let mut u = TypeUniverse::new();
        let list = u.declare_named("example.com/coll", "coll", "List");
        let string = u.basic("string");
        let inst = u.instantiate(list, vec![string]);
        assert_eq!(u.type_string(inst), "example.com/coll.List[string]");
    }

    #[test]
    fn test_instance_sees_methods_added_after_instantiation() {
        let mut u = TypeUniverse::new();
        let list = u.declare_named("example.com/coll", "coll", "List");
        let string = u.basic("string");
        let inst = u.instantiate(list, vec![string]);
        let int = u.basic("int");
        u.add_method(list, "Len", Signature::new(vec![], vec![int]));

        assert_eq!(u.origin(inst), list);
        assert_eq!(u.origin(list), list);
        let TypeKind::Named(origin) = u.kind(u.origin(inst)) else {
            panic!("expected named type");
        };
        assert_eq!(origin.methods.len(), 1);
    }

    #[test]
    fn test_render_struct_and_interface() {
        let mut u = TypeUniverse::new();
        let bar = u.declare_named("example.com/sample", "sample", "Bar");
        let string = u.basic("string");
        let st = u.struct_type(vec![
            StructField {
                name: "Bar".into(),
                ty: bar,
                embedded: true,
            },
            StructField {
                name: "Name".into(),
                ty: string,
                embedded: false,
            },
        ]);
        assert_eq!(u.type_string(st), "struct{example.com/sample.Bar; Name string}");

        let empty = u.interface_type(Vec::new());
        assert_eq!(u.type_string(empty), "interface{}");
    }

    #[test]
    fn test_render_unnamed_cycle_is_bounded() {
        let mut u = TypeUniverse::new();
        let int = u.basic("int");
        let slot = u.slice(int);
        u.replace(slot, TypeKind::Slice(slot));
        let rendered = u.type_string(slot);
        assert!(rendered.ends_with("..."));
    }

    #[test]
    fn test_lookup_falls_back_to_test_package() {
        let mut u = TypeUniverse::new();
        let foo = u.declare_named("example.com/pkg_test", "pkg_test", "ExampleFoo");
        assert_eq!(u.lookup("example.com/pkg", "ExampleFoo"), Some(foo));
        assert_eq!(u.lookup("example.com/pkg", "Missing"), None);
    }
}
