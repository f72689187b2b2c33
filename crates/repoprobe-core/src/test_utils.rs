use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use repoprobe_config::loader::LoadOptions;
use repoprobe_utils::path::reroot;

use crate::backend::Capabilities;

/// A host described entirely in memory.
#[derive(Default)]
pub struct FakeHost {
    executables: HashMap<String, PathBuf>,
    paths: HashSet<PathBuf>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`, resolving to `target`.
    pub fn with_executable(mut self, name: &str, target: &str) -> Self {
        self.executables
            .insert(name.to_string(), PathBuf::from(target));
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.paths.insert(PathBuf::from(path));
        self
    }
}

impl Capabilities for FakeHost {
    fn resolve_executable(&self, name: &str) -> Option<PathBuf> {
        self.executables.get(name).cloned()
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }
}

/// Writes `content` to `path` under `root`, creating parent directories.
pub fn write_file(root: &Path, path: &str, content: &str) {
    let path = reroot(root, path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn root_options(root: &Path) -> LoadOptions {
    LoadOptions {
        root: root.to_path_buf(),
        ..LoadOptions::default()
    }
}
