//! Error types for type catalogs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a type catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read catalog file
    #[error("Failed to read type catalog: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Reference to a package the catalog does not declare
    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    /// Reference to a type the catalog does not declare
    #[error("Unknown type {name:?} in package {package:?}")]
    UnknownType { package: String, name: String },

    /// Type declared twice in the same package
    #[error("Type {name:?} declared twice in package {package:?}")]
    DuplicateType { package: String, name: String },
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
