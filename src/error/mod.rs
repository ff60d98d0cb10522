//! Error types and handling for Vela
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`appfile`]: Appfile loading and validation errors
//! - [`template`]: Template resolution and expansion errors
//! - [`manifest`]: Deploy manifest encoding errors
//! - [`cluster`]: Cluster object store errors
//! - [`fs`]: File system errors

pub mod appfile;
pub mod cluster;
pub mod fs;
pub mod manifest;
pub mod template;

#[allow(unused_imports)]
pub use appfile::{
    invalid as appfile_invalid, not_found as appfile_not_found,
    parse_failed as appfile_parse_failed,
};
#[allow(unused_imports)]
pub use cluster::{get_failed as cluster_get_failed, upsert_failed as cluster_upsert_failed};
#[allow(unused_imports)]
pub use fs::{io_error, read_failed as file_read_failed, write_failed as file_write_failed};
#[allow(unused_imports)]
pub use manifest::encode_failed;
#[allow(unused_imports)]
pub use template::{
    expansion_failed as parameter_expansion_failed, not_found as template_not_found,
    parse_failed as template_parse_failed,
};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Vela operations
#[derive(Error, Diagnostic, Debug)]
pub enum VelaError {
    // Appfile errors
    #[error("Appfile not found: {path}")]
    #[diagnostic(
        code(vela::appfile::not_found),
        help("Create a vela.yaml in the current directory or pass one with -f <path>")
    )]
    AppfileNotFound { path: String },

    #[error("Failed to parse appfile: {path}")]
    #[diagnostic(code(vela::appfile::parse_failed))]
    AppfileParseFailed { path: String, reason: String },

    #[error("Invalid appfile: {message}")]
    #[diagnostic(
        code(vela::appfile::invalid),
        help("An appfile needs a non-empty 'name' and at least one entry under 'services'")
    )]
    AppfileInvalid { message: String },

    // Environment errors
    #[error("Failed to load environment '{name}': {reason}")]
    #[diagnostic(
        code(vela::env::load_failed),
        help("Check the env file under $VELA_HOME/envs, or remove it to fall back to the default env")
    )]
    EnvLoadFailed { name: String, reason: String },

    // Template errors
    #[error("No template found for service '{service}' of type '{workload_type}'")]
    #[diagnostic(
        code(vela::template::not_found),
        help("Built-in types are webservice, worker and task; custom templates go in $VELA_HOME/templates")
    )]
    TemplateNotFound {
        service: String,
        workload_type: String,
    },

    #[error("Failed to parse template: {path}")]
    #[diagnostic(code(vela::template::parse_failed))]
    TemplateParseFailed { path: String, reason: String },

    #[error("Failed to render service '{service}': {reason}")]
    #[diagnostic(code(vela::template::expansion_failed))]
    ParameterExpansionFailed { service: String, reason: String },

    // Manifest errors
    #[error("Failed to encode resource '{name}': {reason}")]
    #[diagnostic(code(vela::manifest::encode_failed))]
    EncodeFailed { name: String, reason: String },

    // Cluster errors
    #[error("Failed to get {kind} '{namespace}/{name}': {reason}")]
    #[diagnostic(code(vela::cluster::get_failed))]
    ClusterGetFailed {
        kind: String,
        namespace: String,
        name: String,
        reason: String,
    },

    #[error("Failed to apply {kind} '{namespace}/{name}': {reason}")]
    #[diagnostic(
        code(vela::cluster::upsert_failed),
        help("Earlier resources stay applied; re-run 'vela up' once the cause is fixed")
    )]
    ClusterUpsertFailed {
        kind: String,
        namespace: String,
        name: String,
        reason: String,
    },

    #[error("Deadline exceeded while {operation}")]
    #[diagnostic(code(vela::cluster::deadline_exceeded))]
    DeadlineExceeded { operation: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(vela::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(vela::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(vela::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for VelaError {
    fn from(err: std::io::Error) -> Self {
        VelaError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, VelaError>;
