use std::{error::Error, fmt, io, path::PathBuf};

/// Failure to turn a user-supplied path string into an absolute path.
#[derive(Debug)]
pub enum PathError {
    Empty,
    CurrentDir(io::Error),
    /// `$var` or `${var}` names an unset environment variable.
    UnsetVariable { var: String, path: String },
    /// `${` without a closing `}`.
    UnclosedVariable { fragment: String },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => f.write_str("Empty path"),
            PathError::CurrentDir(err) => {
                write!(f, "Cannot resolve relative path, working directory unavailable: {err}")
            }
            PathError::UnsetVariable { var, path } => {
                write!(f, "`${var}` in `{path}` is not set")
            }
            PathError::UnclosedVariable { fragment } => {
                write!(f, "Missing `}}` after `{fragment}`")
            }
        }
    }
}

impl Error for PathError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PathError::CurrentDir(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure while reading configuration files or listing their directories.
#[derive(Debug)]
pub enum FileSystemError {
    Read { path: PathBuf, source: io::Error },
    List { path: PathBuf, source: io::Error },
    NotADirectory { path: PathBuf },
}

impl FileSystemError {
    pub fn path(&self) -> &PathBuf {
        match self {
            FileSystemError::Read { path, .. }
            | FileSystemError::List { path, .. }
            | FileSystemError::NotADirectory { path } => path,
        }
    }
}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::Read { path, source } => {
                write!(f, "Cannot read {}: {source}", path.display())
            }
            FileSystemError::List { path, source } => {
                write!(f, "Cannot list {}: {source}", path.display())
            }
            FileSystemError::NotADirectory { path } => {
                write!(f, "{} exists but is not a directory", path.display())
            }
        }
    }
}

impl Error for FileSystemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FileSystemError::Read { source, .. } | FileSystemError::List { source, .. } => {
                Some(source)
            }
            FileSystemError::NotADirectory { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum UtilsError {
    Path(PathError),
    FileSystem(FileSystemError),
}

impl fmt::Display for UtilsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilsError::Path(err) => err.fmt(f),
            UtilsError::FileSystem(err) => err.fmt(f),
        }
    }
}

impl Error for UtilsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UtilsError::Path(err) => err.source(),
            UtilsError::FileSystem(err) => err.source(),
        }
    }
}

impl From<PathError> for UtilsError {
    fn from(err: PathError) -> Self {
        UtilsError::Path(err)
    }
}

impl From<FileSystemError> for UtilsError {
    fn from(err: FileSystemError) -> Self {
        UtilsError::FileSystem(err)
    }
}

pub type FileSystemResult<T> = std::result::Result<T, FileSystemError>;
pub type PathResult<T> = std::result::Result<T, PathError>;
