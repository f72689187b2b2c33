use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::error::{FileSystemError, FileSystemResult};

pub trait FileSystemProvider {
    /// Reads a file to a string, treating a missing file as absent.
    ///
    /// # Errors
    ///
    /// Returns a [`FileSystemError::Read`] if the file exists but cannot be read (e.g.,
    /// permission denied or invalid UTF-8).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use repoprobe_utils::error::FileSystemResult;
    /// use repoprobe_utils::fs::{FileSystemProvider, StandardFileSystemProvider};
    ///
    /// fn main() -> FileSystemResult<()> {
    ///     let fs = StandardFileSystemProvider;
    ///     if let Some(content) = fs.read_optional("/etc/yum.conf")? {
    ///         println!("{content}");
    ///     }
    ///     Ok(())
    /// }
    /// ```
    fn read_optional<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<Option<String>>;

    /// Lists regular files in `dir`, sorted by file name.
    ///
    /// With `extension` set, only files carrying that extension are listed. A directory that
    /// does not exist yields an empty list.
    ///
    /// # Errors
    ///
    /// * [`FileSystemError::NotADirectory`] if the path exists but is not a directory.
    /// * [`FileSystemError::List`] if the directory cannot be listed.
    fn list_files<P: AsRef<Path>>(
        &self,
        dir: P,
        extension: Option<&str>,
    ) -> FileSystemResult<Vec<PathBuf>>;
}

#[derive(Default, Clone)]
pub struct StandardFileSystemProvider;

impl FileSystemProvider for StandardFileSystemProvider {
    fn read_optional<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<Option<String>> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(FileSystemError::Read {
                path: path.to_path_buf(),
                source: err,
            }),
        }
    }

    fn list_files<P: AsRef<Path>>(
        &self,
        dir: P,
        extension: Option<&str>,
    ) -> FileSystemResult<Vec<PathBuf>> {
        let dir = dir.as_ref();

        if !dir.exists() {
            return Ok(Vec::new());
        }
        if !dir.is_dir() {
            return Err(FileSystemError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let to_error = |err| FileSystemError::List {
            path: dir.to_path_buf(),
            source: err,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(to_error)? {
            let path = entry.map_err(to_error)?.path();
            let wanted = match extension {
                Some(extension) => path.extension().is_some_and(|ext| ext == extension),
                None => true,
            };
            if path.is_file() && wanted {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }
}

/// Reads a file to a string, treating a missing file as absent.
///
/// See [`FileSystemProvider::read_optional`] for detailed documentation.
pub fn read_optional<P: AsRef<Path>>(path: P) -> FileSystemResult<Option<String>> {
    StandardFileSystemProvider.read_optional(path)
}

/// Lists files with the given extension in a directory, sorted by file name.
///
/// See [`FileSystemProvider::list_files`] for detailed documentation.
pub fn files_with_extension<P: AsRef<Path>>(
    dir: P,
    extension: &str,
) -> FileSystemResult<Vec<PathBuf>> {
    StandardFileSystemProvider.list_files(dir, Some(extension))
}

/// Lists every regular file in a directory, sorted by file name.
pub fn list_files<P: AsRef<Path>>(dir: P) -> FileSystemResult<Vec<PathBuf>> {
    StandardFileSystemProvider.list_files(dir, None)
}
