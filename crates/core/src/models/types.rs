//! Resolved type references

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single resolved type reference, as it appears in a parameter, result or field.
///
/// `name` is either a bare identifier (`Reader`), a primitive (`int64`), a generic
/// instantiation (`Map[string, int]`) or a full composite expression
/// (`[]*github.com/acme/widgets.Widget`) which the fixup pass shortens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Type {
    /// Display name of the type
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Name of the package the type is defined in; empty for builtins
    #[serde(skip_serializing_if = "String::is_empty")]
    pub package: String,
    /// Import path of the defining package; empty for builtins
    #[serde(skip_serializing_if = "String::is_empty")]
    pub import_path: String,
    /// Whether the top-level type is a pointer
    #[serde(skip_serializing_if = "is_false")]
    pub is_pointer: bool,
    /// Whether the type is a map, slice, array or channel
    #[serde(skip_serializing_if = "is_false")]
    pub is_composite: bool,
    /// Whether the type is a function signature
    #[serde(skip_serializing_if = "is_false")]
    pub is_func: bool,
    /// Whether the type is the trailing variadic parameter of a signature
    #[serde(skip_serializing_if = "is_false")]
    pub is_variadic: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Type {
    /// Create a builtin type with no package
    pub fn builtin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a named type defined in the given package
    pub fn named(
        name: impl Into<String>,
        package: impl Into<String>,
        import_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            import_path: import_path.into(),
            ..Default::default()
        }
    }

    /// Mark the type as a pointer
    pub fn with_pointer(mut self, pointer: bool) -> Self {
        self.is_pointer = pointer;
        self
    }

    /// Mark the type as composite
    pub fn with_composite(mut self, composite: bool) -> Self {
        self.is_composite = composite;
        self
    }

    /// Whether the type is a builtin (no defining package)
    pub fn is_builtin(&self) -> bool {
        self.package.is_empty() && self.import_path.is_empty()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pointer {
            f.write_str("*")?;
        }
        let mut name = self.name.as_str();
        if self.is_variadic {
            f.write_str("...")?;
            name = name.strip_prefix("[]").unwrap_or(name);
        }
        if !self.is_composite && !self.package.is_empty() {
            write!(f, "{}.", self.package)?;
        }
        f.write_str(name)
    }
}

/// Collect the sorted, deduplicated, non-empty import paths of the given types.
pub(crate) fn collect_deps<'a>(types: impl IntoIterator<Item = &'a Type>) -> Vec<String> {
    let mut deps: Vec<String> = types
        .into_iter()
        .filter(|t| !t.import_path.is_empty())
        .map(|t| t.import_path.clone())
        .collect();
    deps.sort();
    deps.dedup();
    deps
}
