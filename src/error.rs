//! Error types and handling for Workbelt
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only a few variants abort an install run: a capability probe that fails for a
//! reason other than "not found", and an install script that could not be spawned
//! or was terminated without an exit code. Ordinary script failures are recorded
//! on the dependency's result instead.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Workbelt operations
#[derive(Error, Diagnostic, Debug)]
pub enum WorkbeltError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(workbelt::config::not_found),
        help("Create a workbelt.yaml or pass --config <path>")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(workbelt::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(workbelt::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(workbelt::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to render template in {path}: {reason}")]
    #[diagnostic(
        code(workbelt::config::template_failed),
        help("Templates use {{ env.NAME }} or top-level keys of the same file")
    )]
    TemplateFailed { path: String, reason: String },

    #[error("Invalid include pattern '{pattern}': {reason}")]
    #[diagnostic(code(workbelt::config::invalid_include))]
    InvalidInclude { pattern: String, reason: String },

    // Install errors
    #[error("Failed to probe for '{name}': {reason}")]
    #[diagnostic(
        code(workbelt::install::probe_failed),
        help("Check that PATH is set and readable")
    )]
    ProbeFailed { name: String, reason: String },

    #[error("Failed to start install script for '{name}': {reason}")]
    #[diagnostic(code(workbelt::install::spawn_failed))]
    ScriptSpawnFailed { name: String, reason: String },

    #[error("Install script for '{name}' was terminated without an exit code")]
    #[diagnostic(
        code(workbelt::install::terminated),
        help("The script was probably killed by a signal; remaining dependencies were skipped")
    )]
    ScriptTerminated { name: String },

    // Report errors
    #[error("Failed to write report: {path}: {reason}")]
    #[diagnostic(code(workbelt::report::write_failed))]
    ReportWriteFailed { path: String, reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(workbelt::fs::io_error))]
    IoError { message: String },
}

impl WorkbeltError {
    /// Whether this error aborts an install run rather than being recorded per dependency
    pub fn is_fatal_install_error(&self) -> bool {
        matches!(
            self,
            WorkbeltError::ProbeFailed { .. }
                | WorkbeltError::ScriptSpawnFailed { .. }
                | WorkbeltError::ScriptTerminated { .. }
        )
    }
}

impl From<std::io::Error> for WorkbeltError {
    fn from(err: std::io::Error) -> Self {
        WorkbeltError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for WorkbeltError {
    fn from(err: serde_yaml::Error) -> Self {
        WorkbeltError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for WorkbeltError {
    fn from(err: serde_json::Error) -> Self {
        WorkbeltError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, WorkbeltError>;
