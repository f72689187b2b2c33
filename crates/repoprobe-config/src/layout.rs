use std::{fmt, path::PathBuf, str::FromStr};

use crate::error::ConfigError;

/// The package-manager family whose configuration is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Yum,
    Dnf,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Yum => "yum",
            BackendKind::Dnf => "dnf",
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            BackendKind::Yum => Layout::yum(),
            BackendKind::Dnf => Layout::dnf(),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yum" => Ok(BackendKind::Yum),
            "dnf" => Ok(BackendKind::Dnf),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

/// Where a package manager keeps its configuration, relative to the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub main_config: PathBuf,
    /// Used when `[main]` does not set `reposdir`.
    pub default_reposdirs: Vec<PathBuf>,
    /// Loaded in order; a later directory overrides an earlier one.
    pub varsdirs: Vec<PathBuf>,
    /// Prefix of the `<PREFIX>0`..`<PREFIX>9` environment variables.
    pub env_prefix: &'static str,
}

impl Layout {
    pub fn yum() -> Self {
        Self {
            main_config: PathBuf::from("/etc/yum.conf"),
            default_reposdirs: vec![
                PathBuf::from("/etc/yum.repos.d"),
                PathBuf::from("/etc/yum/repos.d"),
            ],
            varsdirs: vec![PathBuf::from("/etc/yum/vars")],
            env_prefix: "YUM",
        }
    }

    pub fn dnf() -> Self {
        Self {
            main_config: PathBuf::from("/etc/dnf/dnf.conf"),
            default_reposdirs: vec![
                PathBuf::from("/etc/yum.repos.d"),
                PathBuf::from("/etc/yum/repos.d"),
                PathBuf::from("/etc/distro.repos.d"),
            ],
            varsdirs: vec![PathBuf::from("/etc/dnf/vars"), PathBuf::from("/etc/yum/vars")],
            env_prefix: "DNF",
        }
    }
}
