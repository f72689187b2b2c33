//! Detection of the package manager available on the host.

use std::{
    fs,
    path::{Path, PathBuf},
};

use repoprobe_config::layout::BackendKind;
use repoprobe_utils::path::reroot;
use tracing::{debug, warn};

use crate::{error::ProbeError, ProbeResult};

const DNF_EXECUTABLES: [&str; 3] = ["dnf", "dnf-3", "dnf5"];
const EXECUTABLE_DIRS: [&str; 3] = ["/usr/bin", "/bin", "/usr/sbin"];

/// What the probe needs to know about a host.
pub trait Capabilities {
    /// Locates an executable and resolves symlinks, returning the final path.
    fn resolve_executable(&self, name: &str) -> Option<PathBuf>;

    /// Whether an absolute configuration path exists on the host.
    fn path_exists(&self, path: &Path) -> bool;
}

/// [`Capabilities`] of the running system, or of an installroot.
pub struct HostCapabilities {
    root: PathBuf,
}

impl HostCapabilities {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        if self.root == Path::new("/") {
            return which::which(name).ok();
        }
        EXECUTABLE_DIRS
            .iter()
            .map(|dir| reroot(&self.root, dir).join(name))
            .find(|path| path.is_file())
    }
}

impl Capabilities for HostCapabilities {
    fn resolve_executable(&self, name: &str) -> Option<PathBuf> {
        let path = self.locate(name)?;
        match fs::canonicalize(&path) {
            Ok(resolved) => Some(resolved),
            // Absolute links inside an installroot point at the host.
            Err(_) => fs::read_link(&path).ok().or(Some(path)),
        }
    }

    fn path_exists(&self, path: &Path) -> bool {
        reroot(&self.root, path).exists()
    }
}

fn is_dnf_executable(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("dnf"))
}

/// Yum is present when `yum` exists and is not a link to dnf.
pub fn has_yum(caps: &dyn Capabilities) -> bool {
    match caps.resolve_executable("yum") {
        Some(path) if is_dnf_executable(&path) => {
            debug!("yum resolves to {}, treating as dnf", path.display());
            false
        }
        Some(path) => {
            debug!("found yum at {}", path.display());
            true
        }
        None => false,
    }
}

pub fn has_dnf(caps: &dyn Capabilities) -> bool {
    DNF_EXECUTABLES
        .iter()
        .any(|name| caps.resolve_executable(name).is_some())
        || caps.path_exists(&BackendKind::Dnf.layout().main_config)
}

/// Picks the backend: the configured one, else yum, else dnf.
pub fn select_backend(
    caps: &dyn Capabilities,
    preferred: Option<BackendKind>,
) -> ProbeResult<BackendKind> {
    if let Some(kind) = preferred {
        debug!("using configured backend {}", kind);
        return Ok(kind);
    }

    if has_yum(caps) {
        return Ok(BackendKind::Yum);
    }
    debug!("yum not available, falling back to dnf");

    if has_dnf(caps) {
        return Ok(BackendKind::Dnf);
    }

    Err(ProbeError::MissingBackend {
        tried: "yum, dnf".to_string(),
    })
}

/// Ensures yum is usable; the only backend of the legacy collector.
pub fn require_yum(caps: &dyn Capabilities, preferred: Option<BackendKind>) -> ProbeResult<()> {
    match preferred {
        Some(BackendKind::Yum) => return Ok(()),
        Some(other) => warn!("ignoring configured backend {}, only yum is supported", other),
        None => {}
    }

    if has_yum(caps) {
        Ok(())
    } else {
        Err(ProbeError::MissingBackend {
            tried: "yum".to_string(),
        })
    }
}
