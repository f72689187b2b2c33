//! Error types for repoprobe-core.

use miette::Diagnostic;
use repoprobe_config::error::ConfigError;
use thiserror::Error;

/// Core error type for repository probing.
#[derive(Error, Diagnostic, Debug)]
pub enum ProbeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("No supported package manager found (tried {tried})")]
    #[diagnostic(
        code(repoprobe::missing_backend),
        help("Install yum or dnf, or point --root at a system that has one")
    )]
    MissingBackend { tried: String },

    #[error("Failed to parse {field} of repository '{repo}' as a rendered vector")]
    #[diagnostic(
        code(repoprobe::vector_wrapper),
        help("Rewrite the option as a plain space- or comma-separated list")
    )]
    VectorWrapper {
        repo: String,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(repoprobe::json))]
    Json(#[from] serde_json::Error),

    #[error("Error while {action}")]
    #[diagnostic(code(repoprobe::io))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for adding context to IO errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, ProbeError>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, ProbeError>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| ProbeError::IoError {
            action: context(),
            source: err,
        })
    }
}
