//! Configuration for interface building

use serde::{Deserialize, Serialize};

use super::query::Query;

/// Maximum depth of type-graph traversal, for both type normalization and
/// embedded method collection.
pub const MAX_DEPTH: usize = 128;

/// Options for building an interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceOptions {
    /// Type to build the interface for
    pub query: Query,

    /// Include unexported (lower-case) methods
    #[serde(default)]
    pub unexported: bool,

    /// Name of the package the generated code is emitted into; types from a
    /// package with this name lose their qualifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
}

impl InterfaceOptions {
    /// Create options for a query with defaults
    pub fn new(query: Query) -> Self {
        Self {
            query,
            unexported: false,
            package_name: None,
        }
    }

    /// Create a builder for custom options
    pub fn builder(query: Query) -> InterfaceOptionsBuilder {
        InterfaceOptionsBuilder {
            options: Self::new(query),
        }
    }
}

/// Builder for InterfaceOptions
#[derive(Debug)]
pub struct InterfaceOptionsBuilder {
    options: InterfaceOptions,
}

impl InterfaceOptionsBuilder {
    /// Include or exclude unexported methods
    pub fn unexported(mut self, unexported: bool) -> Self {
        self.options.unexported = unexported;
        self
    }

    /// Set the output package name; an empty name clears it
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.options.package_name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Build the options
    pub fn build(self) -> InterfaceOptions {
        self.options
    }
}
