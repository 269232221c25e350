//! Error type shared by the command handlers

use std::path::PathBuf;

use shapegen_core::inference::InferenceError;
use shapegen_core::interface::InterfaceError;
use shapegen_core::typeinfo::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Interface error: {0}")]
    Interface(#[from] InterfaceError),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub(crate) fn io(action: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        CliError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
