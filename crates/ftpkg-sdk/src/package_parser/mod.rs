//! Package YAML loading.
//!
//! Loading is split in two: the raw document is read as a [`serde_yaml::Value`]
//! so it can be checked structurally, and only then converted to the typed
//! [`Package`] model.

use std::path::{Path, PathBuf};

use crate::model::Package;

/// Error during package document loading.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read package file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse package YAML '{}': {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("package document does not match the package model: {0}")]
    Model(#[source] serde_yaml::Error),
}

/// Read and parse a package YAML file into an untyped document.
pub fn parse_document(path: &Path) -> Result<serde_yaml::Value, ParseError> {
    let yaml_content = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_yaml::from_str(&yaml_content).map_err(|e| ParseError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse a package document from a YAML string.
pub fn parse_document_str(yaml: &str) -> Result<serde_yaml::Value, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Convert a structurally valid document into the typed package model.
pub fn into_package(document: serde_yaml::Value) -> Result<Package, ParseError> {
    serde_yaml::from_value(document).map_err(ParseError::Model)
}
