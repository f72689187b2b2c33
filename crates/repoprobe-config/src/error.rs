use std::path::PathBuf;

use miette::Diagnostic;
use repoprobe_utils::error::{FileSystemError, PathError, UtilsError};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(repoprobe_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Invalid line {line} in {}: `{content}`", .path.display())]
    #[diagnostic(
        code(repoprobe_config::ini_syntax),
        help("Lines must be a [section] header, a `key = value` entry, or a comment")
    )]
    IniSyntax {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Entry on line {line} of {} appears before any [section] header", .path.display())]
    #[diagnostic(
        code(repoprobe_config::missing_section),
        help("Move the entry below a [main] or [repository] header")
    )]
    EntryOutsideSection { path: PathBuf, line: usize },

    #[error("Invalid boolean value `{value}` for option `{key}`")]
    #[diagnostic(
        code(repoprobe_config::invalid_boolean),
        help("Use one of 1, yes, true, on or 0, no, false, off")
    )]
    InvalidBoolean { key: String, value: String },

    #[error("Invalid backend: {0}")]
    #[diagnostic(
        code(repoprobe_config::invalid_backend),
        help("Supported backends are `yum` and `dnf`")
    )]
    InvalidBackend(String),

    #[error("Bad id for repository: {0}")]
    #[diagnostic(
        code(repoprobe_config::invalid_repository_id),
        help("Repository ids may only contain letters, digits, `-`, `_`, `.` and `:`")
    )]
    InvalidRepositoryId(String),

    #[error(transparent)]
    #[diagnostic(code(repoprobe_config::utils))]
    Utils(#[from] UtilsError),
}

impl From<PathError> for ConfigError {
    fn from(err: PathError) -> Self {
        Self::Utils(UtilsError::Path(err))
    }
}

impl From<FileSystemError> for ConfigError {
    fn from(err: FileSystemError) -> Self {
        Self::Utils(UtilsError::FileSystem(err))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
