//! Error types for interface building

use thiserror::Error;

/// Errors that can occur while parsing a type query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Empty query string
    #[error("query string is empty")]
    Empty,

    /// No unambiguous separator between package and type name
    #[error("query string syntax error: {query:?}")]
    Syntax { query: String },

    /// Package part is empty
    #[error("package is empty")]
    EmptyPackage,

    /// Type name part is empty
    #[error("type name is empty")]
    EmptyTypeName,
}

/// Errors that can occur while building an interface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterfaceError {
    /// Malformed query
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    /// No named type matches the query
    #[error("type {type_name:?} not found in package {package:?}")]
    TypeNotFound { type_name: String, package: String },

    /// Method set is empty after filtering
    #[error("no exported methods found for {type_name:?} (package {package:?})")]
    NoExportedMethods { type_name: String, package: String },

    /// The type graph is deeper than the traversal guard allows
    #[error("recursive types not supported: {type_name} (depth limit {limit})")]
    RecursionLimitExceeded { type_name: String, limit: usize },
}

/// Result type for interface building
pub type InterfaceResult<T> = Result<T, InterfaceError>;
