//! The yum backend.

use std::collections::HashSet;

use repoprobe_config::{
    layout::BackendKind,
    loader::{load_repo_config, LoadOptions},
    repository::{parse_list, RepoSection},
};
use tracing::{debug, warn};

use crate::ProbeResult;

/// A repository as yum sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YumRepo {
    pub id: String,
    pub name: String,
    pub baseurl: Vec<String>,
    pub mirrorlist: Option<String>,
    pub enabled: bool,
    pub gpgcheck: bool,
    pub gpgkey: Vec<String>,
}

impl YumRepo {
    /// Builds a repository, `None` when one of its booleans is invalid.
    fn from_section(section: &RepoSection, default_gpgcheck: bool) -> Option<Self> {
        let enabled = section.enabled();
        let gpgcheck = section.gpgcheck();
        let (enabled, gpgcheck) = match (enabled, gpgcheck) {
            (Ok(enabled), Ok(gpgcheck)) => (enabled, gpgcheck),
            (Err(err), _) | (_, Err(err)) => {
                warn!(
                    "repository '{}' in {}: {}, skipping",
                    section.id,
                    section.source.display(),
                    err
                );
                return None;
            }
        };

        let name = match section.name() {
            Some(name) => name.to_string(),
            None => {
                warn!("repository '{}' is missing name, using id", section.id);
                section.id.clone()
            }
        };

        Some(Self {
            id: section.id.clone(),
            name,
            baseurl: section.baseurl.as_deref().map(parse_list).unwrap_or_default(),
            mirrorlist: section.mirrorlist().map(String::from),
            enabled: enabled.unwrap_or(true),
            gpgcheck: gpgcheck.unwrap_or(default_gpgcheck),
            gpgkey: section.gpgkey.as_deref().map(parse_list).unwrap_or_default(),
        })
    }
}

/// A read-only yum session over the host configuration.
#[derive(Clone, Debug, Default)]
pub struct YumBase {
    repos: Vec<YumRepo>,
}

impl YumBase {
    pub fn open(options: &LoadOptions) -> ProbeResult<Self> {
        let config = load_repo_config(BackendKind::Yum, options)?;
        let default_gpgcheck = config.main.gpgcheck.unwrap_or(false);

        let mut seen = HashSet::new();
        let mut repos = Vec::with_capacity(config.repos.len());
        for section in &config.repos {
            if !seen.insert(section.id.as_str()) {
                warn!(
                    "repository '{}' in {} is already defined, skipping",
                    section.id,
                    section.source.display()
                );
                continue;
            }
            if let Some(repo) = YumRepo::from_section(section, default_gpgcheck) {
                repos.push(repo);
            }
        }

        debug!("yum: {} repositories", repos.len());
        Ok(Self { repos })
    }

    /// All repositories, sorted by id.
    pub fn sort(&self) -> Vec<&YumRepo> {
        let mut repos: Vec<_> = self.repos.iter().collect();
        repos.sort_by(|a, b| a.id.cmp(&b.id));
        repos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{root_options, write_file};
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn test_open_sorts_by_id() {
        let root = tempdir().unwrap();
        write_file(
            root.path(),
            "/etc/yum.repos.d/b.repo",
            "[updates]\nname=Updates\nbaseurl=http://u/\n\n[base]\nname=Base\nbaseurl=http://b/\n",
        );
        write_file(
            root.path(),
            "/etc/yum.repos.d/a.repo",
            "[extras]\nname=Extras\nmirrorlist=http://m/?repo=extras\n",
        );

        let yum = YumBase::open(&root_options(root.path())).unwrap();
        let ids: Vec<_> = yum.sort().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["base", "extras", "updates"]);

        let extras = yum.sort()[1];
        assert!(extras.baseurl.is_empty());
        assert_eq!(extras.mirrorlist.as_deref(), Some("http://m/?repo=extras"));
    }

    #[test]
    #[serial]
    fn test_open_defaults() {
        let root = tempdir().unwrap();
        write_file(root.path(), "/etc/yum.conf", "[main]\ngpgcheck=1\n");
        write_file(
            root.path(),
            "/etc/yum.repos.d/local.repo",
            "[local]\nbaseurl=file:///srv/a\n  file:///srv/b\ngpgkey=file:///k1,file:///k2\n",
        );

        let yum = YumBase::open(&root_options(root.path())).unwrap();
        let local = yum.sort()[0];
        assert_eq!(local.name, "local");
        assert!(local.enabled);
        assert!(local.gpgcheck);
        assert_eq!(local.baseurl, vec!["file:///srv/a", "file:///srv/b"]);
        assert_eq!(local.gpgkey, vec!["file:///k1", "file:///k2"]);
    }

    #[test]
    #[serial]
    fn test_open_skips_invalid_boolean() {
        let root = tempdir().unwrap();
        write_file(
            root.path(),
            "/etc/yum.repos.d/mixed.repo",
            "[broken]\nname=Broken\nenabled=perhaps\n\n[ok]\nname=Ok\nenabled=0\n",
        );

        let yum = YumBase::open(&root_options(root.path())).unwrap();
        let repos = yum.sort();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].id, "ok");
        assert!(!repos[0].enabled);
    }

    #[test]
    #[serial]
    fn test_open_first_duplicate_wins() {
        let root = tempdir().unwrap();
        write_file(root.path(), "/etc/yum.repos.d/a.repo", "[dup]\nname=First\n");
        write_file(root.path(), "/etc/yum.repos.d/b.repo", "[dup]\nname=Second\n");

        let yum = YumBase::open(&root_options(root.path())).unwrap();
        let repos = yum.sort();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "First");
    }
}
