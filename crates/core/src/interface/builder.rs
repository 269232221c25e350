//! Interface builder

use tracing::{debug, info};

use crate::models::{Func, Interface, Type};
use crate::typeinfo::{Method, Param, TypeInfoProvider, TypeKind, TypeRef};

use super::collector::collect_methods;
use super::config::InterfaceOptions;
use super::error::{InterfaceError, InterfaceResult};
use super::fixup::fixup;
use super::normalize::Normalizer;
use super::query::Query;

const TEST_PACKAGE_SUFFIX: &str = "_test";

/// Builds the minimal interface satisfied by a named type.
pub struct InterfaceBuilder<'p, P: TypeInfoProvider + ?Sized> {
    provider: &'p P,
}

impl<'p, P: TypeInfoProvider + ?Sized> InterfaceBuilder<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Build the interface for the type named by `options.query`.
    ///
    /// A type with no exported methods is retried in the package's external
    /// test package, where a same-named declaration may shadow it.
    pub fn build(&self, options: &InterfaceOptions) -> InterfaceResult<Interface> {
        options.query.validate()?;
        let (named, query) = self.resolve(&options.query)?;
        match self.build_resolved(named, &query, options) {
            Err(err @ InterfaceError::NoExportedMethods { .. }) => {
                self.retry_in_test_package(&query, options).unwrap_or(Err(err))
            }
            result => result,
        }
    }

    fn retry_in_test_package(
        &self,
        query: &Query,
        options: &InterfaceOptions,
    ) -> Option<InterfaceResult<Interface>> {
        if query.package.ends_with(TEST_PACKAGE_SUFFIX) {
            return None;
        }
        let test_query = Query {
            package: format!("{}{}", query.package, TEST_PACKAGE_SUFFIX),
            type_name: query.type_name.clone(),
        };
        let (named, resolved) = self.resolve(&test_query).ok()?;
        if resolved.package != test_query.package {
            return None;
        }
        debug!(package = %resolved.package, "Retrying in external test package");
        Some(self.build_resolved(named, &resolved, options))
    }

    fn build_resolved(
        &self,
        named: TypeRef,
        query: &Query,
        options: &InterfaceOptions,
    ) -> InterfaceResult<Interface> {
        let methods = collect_methods(self.provider, named)?;
        debug!(
            type_name = %query.type_name,
            package = %query.package,
            collected = methods.len(),
            "Collected method set"
        );

        let normalizer = Normalizer::new(self.provider);
        let package_name = options.package_name.as_deref();
        let mut funcs = Vec::with_capacity(methods.len());
        for (name, method) in &methods {
            if !options.unexported && !is_exported(name) {
                debug!(method = %name, "Skipping unexported method");
                continue;
            }
            funcs.push(self.build_func(&normalizer, method, query, package_name)?);
        }

        if funcs.is_empty() {
            return Err(InterfaceError::NoExportedMethods {
                type_name: options.query.type_name.clone(),
                package: options.query.package.clone(),
            });
        }

        let interface = Interface::new(funcs);
        info!(
            type_name = %query.type_name,
            methods = interface.len(),
            deps = interface.deps().len(),
            "Built interface"
        );
        Ok(interface)
    }

    /// Find the queried named type. When it lives in the external test package
    /// the returned query names that package, so fixup treats it as local.
    fn resolve(&self, query: &Query) -> InterfaceResult<(TypeRef, Query)> {
        let not_found = || InterfaceError::TypeNotFound {
            type_name: query.type_name.clone(),
            package: query.package.clone(),
        };
        let ty = self
            .provider
            .lookup(&query.package, &query.type_name)
            .ok_or_else(not_found)?;
        let TypeKind::Named(named) = self.provider.kind(ty) else {
            return Err(not_found());
        };
        let resolved = match &named.package {
            Some(pkg) if pkg.path != query.package => Query {
                package: pkg.path.clone(),
                type_name: query.type_name.clone(),
            },
            _ => query.clone(),
        };
        Ok((ty, resolved))
    }

    fn build_func(
        &self,
        normalizer: &Normalizer<'_, P>,
        method: &Method,
        query: &Query,
        package_name: Option<&str>,
    ) -> InterfaceResult<Func> {
        let signature = &method.signature;
        let mut ins = self.convert(normalizer, &signature.params, query, package_name)?;
        if signature.variadic {
            if let Some(last) = ins.last_mut() {
                last.is_variadic = true;
            }
        }
        let outs = self.convert(normalizer, &signature.results, query, package_name)?;
        Ok(Func::new(method.name.clone()).with_ins(ins).with_outs(outs))
    }

    fn convert(
        &self,
        normalizer: &Normalizer<'_, P>,
        params: &[Param],
        query: &Query,
        package_name: Option<&str>,
    ) -> InterfaceResult<Vec<Type>> {
        params
            .iter()
            .map(|param| {
                let mut typ = normalizer.normalize(param.ty)?;
                fixup(&mut typ, query, package_name);
                Ok(typ)
            })
            .collect()
    }
}

/// Methods whose name starts with a lower-case letter are unexported.
fn is_exported(name: &str) -> bool {
    !name.chars().next().is_some_and(char::is_lowercase)
}

/// Build an interface with the given options
pub fn build_interface<P: TypeInfoProvider + ?Sized>(
    provider: &P,
    options: &InterfaceOptions,
) -> InterfaceResult<Interface> {
    InterfaceBuilder::new(provider).build(options)
}

/// Build an interface for a query string such as `"net".Interface`, with
/// default options.
pub fn build_interface_for<P: TypeInfoProvider + ?Sized>(
    provider: &P,
    query: &str,
) -> InterfaceResult<Interface> {
    let query = Query::parse(query)?;
    build_interface(provider, &InterfaceOptions::new(query))
}
