//! Serializable description of packages and their named types
//!
//! A catalog is produced by whatever tool loads the real packages and handed to
//! the builder as JSON or YAML. Named types are referenced by `(package, name)`
//! so declarations may refer to each other in any order, including cyclically.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{CatalogError, CatalogResult};
use super::universe::TypeUniverse;
use super::{ChanDir, Method, Param, Signature, StructField, TypeRef};

/// Type expression as written in a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeExpr {
    /// Predeclared type (`int`, `string`, `error`, `any`, ...)
    Basic { name: String },
    /// Reference to a named type declared in the catalog
    Named {
        package: String,
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TypeExpr>,
    },
    Pointer { elem: Box<TypeExpr> },
    Slice { elem: Box<TypeExpr> },
    Array { len: u64, elem: Box<TypeExpr> },
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Func {
        #[serde(default)]
        params: Vec<ParamDecl>,
        #[serde(default)]
        results: Vec<ParamDecl>,
        #[serde(default)]
        variadic: bool,
    },
    Struct {
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    Interface {
        #[serde(default)]
        methods: Vec<MethodDecl>,
    },
}

impl TypeExpr {
    pub fn basic(name: impl Into<String>) -> Self {
        TypeExpr::Basic { name: name.into() }
    }

    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Named {
            package: package.into(),
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        TypeExpr::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice {
            elem: Box::new(elem),
        }
    }
}

/// Parameter or result declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl From<TypeExpr> for ParamDecl {
    fn from(ty: TypeExpr) -> Self {
        Self { name: None, ty }
    }
}

/// Struct field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub embedded: bool,
}

/// Method declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub results: Vec<ParamDecl>,
    #[serde(default)]
    pub variadic: bool,
}

/// Named type declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<TypeExpr>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

/// Package declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDecl {
    /// Import path
    pub path: String,
    /// Package name; defaults to the last path segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl PackageDecl {
    /// Package name used to qualify identifiers
    pub fn package_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => self.path.rsplit('/').next().unwrap_or(&self.path),
        }
    }
}

/// A set of packages with their named types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeCatalog {
    #[serde(default)]
    pub packages: Vec<PackageDecl>,
}

impl TypeCatalog {
    pub fn from_json(input: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_yaml(input: &str) -> CatalogResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Read a catalog file; `.yaml`/`.yml` files are parsed as YAML, anything
    /// else as JSON.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Build the type graph described by the catalog.
    pub fn to_universe(&self) -> CatalogResult<TypeUniverse> {
        let mut universe = TypeUniverse::new();
        let mut packages: HashMap<&str, &str> = HashMap::new();

        // Declare every named type first so references resolve in any order.
        for pkg in &self.packages {
            packages.insert(pkg.path.as_str(), pkg.package_name());
            for decl in &pkg.types {
                if universe.get_named(&pkg.path, &decl.name).is_some() {
                    return Err(CatalogError::DuplicateType {
                        package: pkg.path.clone(),
                        name: decl.name.clone(),
                    });
                }
                universe.declare_named(&pkg.path, pkg.package_name(), &decl.name);
            }
        }

        let mut resolver = Resolver {
            universe: &mut universe,
            packages: &packages,
        };
        for pkg in &self.packages {
            for decl in &pkg.types {
                let named = resolver.named(&pkg.path, &decl.name)?;
                if let Some(underlying) = &decl.underlying {
                    let underlying = resolver.resolve(underlying)?;
                    resolver.universe.set_underlying(named, underlying);
                }
                for method in &decl.methods {
                    let signature = resolver.signature(
                        &method.params,
                        &method.results,
                        method.variadic,
                    )?;
                    resolver.universe.add_method(named, &method.name, signature);
                }
            }
        }

        tracing::debug!(
            packages = self.packages.len(),
            types = universe.len(),
            "Loaded type catalog"
        );
        Ok(universe)
    }
}

struct Resolver<'a> {
    universe: &'a mut TypeUniverse,
    packages: &'a HashMap<&'a str, &'a str>,
}

impl Resolver<'_> {
    fn named(&self, package: &str, name: &str) -> CatalogResult<TypeRef> {
        if !self.packages.contains_key(package) {
            return Err(CatalogError::UnknownPackage(package.to_string()));
        }
        self.universe
            .get_named(package, name)
            .ok_or_else(|| CatalogError::UnknownType {
                package: package.to_string(),
                name: name.to_string(),
            })
    }

    fn resolve(&mut self, expr: &TypeExpr) -> CatalogResult<TypeRef> {
        let ty = match expr {
            TypeExpr::Basic { name } => self.universe.basic(name),
            TypeExpr::Named {
                package,
                name,
                args,
            } => {
                let generic = self.named(package, name)?;
                if args.is_empty() {
                    generic
                } else {
                    let args = args
                        .iter()
                        .map(|arg| self.resolve(arg))
                        .collect::<CatalogResult<Vec<_>>>()?;
                    self.universe.instantiate(generic, args)
                }
            }
            TypeExpr::Pointer { elem } => {
                let elem = self.resolve(elem)?;
                self.universe.pointer(elem)
            }
            TypeExpr::Slice { elem } => {
                let elem = self.resolve(elem)?;
                self.universe.slice(elem)
            }
            TypeExpr::Array { len, elem } => {
                let elem = self.resolve(elem)?;
                self.universe.array(*len, elem)
            }
            TypeExpr::Chan { dir, elem } => {
                let elem = self.resolve(elem)?;
                self.universe.chan(*dir, elem)
            }
            TypeExpr::Map { key, value } => {
                let key = self.resolve(key)?;
                let value = self.resolve(value)?;
                self.universe.map(key, value)
            }
            TypeExpr::Func {
                params,
                results,
                variadic,
            } => {
                let signature = self.signature(params, results, *variadic)?;
                self.universe.signature(signature)
            }
            TypeExpr::Struct { fields } => {
                let mut resolved = Vec::with_capacity(fields.len());
                for field in fields {
                    resolved.push(StructField {
                        name: field.name.clone(),
                        ty: self.resolve(&field.ty)?,
                        embedded: field.embedded,
                    });
                }
                self.universe.struct_type(resolved)
            }
            TypeExpr::Interface { methods } => {
                let mut resolved = Vec::with_capacity(methods.len());
                for method in methods {
                    resolved.push(Method {
                        name: method.name.clone(),
                        signature: self.signature(
                            &method.params,
                            &method.results,
                            method.variadic,
                        )?,
                    });
                }
                self.universe.interface_type(resolved)
            }
        };
        Ok(ty)
    }

    fn params(&mut self, decls: &[ParamDecl]) -> CatalogResult<Vec<Param>> {
        decls
            .iter()
            .map(|decl| {
                Ok(Param {
                    name: decl.name.clone(),
                    ty: self.resolve(&decl.ty)?,
                })
            })
            .collect()
    }

    fn signature(
        &mut self,
        params: &[ParamDecl],
        results: &[ParamDecl],
        variadic: bool,
    ) -> CatalogResult<Signature> {
        Ok(Signature {
            params: self.params(params)?,
            results: self.params(results)?,
            variadic,
        })
    }
}
