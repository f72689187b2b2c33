use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use repoprobe_utils::{
    error::FileSystemError,
    path::{resolve_path, xdg_config_home},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    layout::BackendKind,
    loader::LoadOptions,
};

/// User configuration for repoprobe.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Installroot prefix applied to every configuration path.
    /// Default: /
    pub root: Option<String>,

    /// Backend to use instead of probing the host: "yum" or "dnf".
    pub backend: Option<String>,

    /// Overrides the detected `$releasever`.
    pub releasever: Option<String>,

    /// Replaces the `reposdir` of the package manager's `[main]` section.
    pub reposdir: Option<Vec<String>>,

    /// Extra substitution variables, applied last.
    #[serde(default)]
    pub vars: HashMap<String, String>,
}

/// Location of the user configuration file: `$REPOPROBE_CONFIG`, else
/// `$XDG_CONFIG_HOME/repoprobe/config.toml`.
pub fn default_config_path() -> PathBuf {
    match std::env::var("REPOPROBE_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("repoprobe").join("config.toml"),
    }
}

impl Config {
    /// Loads the configuration from `path`, or from [`default_config_path`],
    /// then applies environment overrides. A missing file yields defaults.
    pub fn new(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(path) => resolve_path(path)?,
            None => default_config_path(),
        };

        let mut config = Self::load(&config_path)?;
        config.apply_env();
        config.resolve()?;

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("loaded configuration from {}", path.display());
                Ok(toml::from_str(&content)?)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(FileSystemError::Read {
                path: path.to_path_buf(),
                source: err,
            }
            .into()),
        }
    }

    fn apply_env(&mut self) {
        if let Ok(root) = std::env::var("REPOPROBE_ROOT") {
            self.root = Some(root);
        }
        if let Ok(backend) = std::env::var("REPOPROBE_BACKEND") {
            self.backend = Some(backend);
        }
    }

    /// Validates values that are only checked lazily otherwise.
    pub fn resolve(&self) -> Result<()> {
        self.backend()?;
        self.root_path()?;
        Ok(())
    }

    pub fn backend(&self) -> Result<Option<BackendKind>> {
        self.backend
            .as_deref()
            .map(str::parse::<BackendKind>)
            .transpose()
    }

    pub fn root_path(&self) -> Result<PathBuf> {
        match self.root.as_deref() {
            Some(root) => Ok(resolve_path(root)?),
            None => Ok(PathBuf::from("/")),
        }
    }

    pub fn load_options(&self) -> Result<LoadOptions> {
        let reposdir = self
            .reposdir
            .as_ref()
            .map(|dirs| {
                dirs.iter()
                    .map(|dir| resolve_path(dir).map_err(ConfigError::from))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(LoadOptions {
            root: self.root_path()?,
            releasever: self.releasever.clone(),
            reposdir,
            vars: self.vars.clone(),
        })
    }
}
