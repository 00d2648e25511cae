//! Error types for node_launcher

use thiserror::Error;

/// The configuration tree does not contain exactly one node entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructuralError {
    #[error("No node entry found: no mapping in the document contains 'ros__parameters'")]
    NodeEntryNotFound,

    #[error("Ambiguous node entry: 'ros__parameters' found at {}", .paths.join(", "))]
    AmbiguousNodeEntry { paths: Vec<String> },
}

/// A value in the document has the wrong shape or a required field is missing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("The field '{field}' is required in the 'ros_execution' block")]
    MissingExecutionOption { field: &'static str },

    #[error("Invalid {kind} remapping '{raw}' (expected 'from:to')")]
    MalformedRemap { kind: String, raw: String },

    #[error("Empty 'from' or 'to' in {kind} remapping '{raw}'")]
    EmptyRemapSide { kind: String, raw: String },

    #[error("Expected {expected} at '{path}', but found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Mapping key under '{path}' is not a string")]
    NonStringKey { path: String },

    #[error("Invalid output mode '{value}' (expected one of screen, log, both, own_log, full)")]
    InvalidOutputMode { value: String },

    #[error("Malformed package URI '{raw}' (expected 'package://<package>/<path>')")]
    MalformedUri { raw: String },
}

/// A reference inside the document could not be resolved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("Package '{package}' not found. Ensure the package is installed and sourced.")]
    PackageNotFound { package: String },
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported configuration document {file}: {reason}")]
    UnsupportedDocument { file: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LaunchError>;
