//! The dnf backend.

use std::collections::HashSet;

use repoprobe_config::{
    layout::BackendKind,
    loader::{load_repo_config, LoadOptions},
    repository::{parse_list, RepoSection},
};
use tracing::{debug, warn};

use crate::ProbeResult;

/// Stored form of a multi-valued dnf option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultiValue {
    List(Vec<String>),
    /// Text of a rendered vector wrapper, e.g. `['http://a', 'http://b']`.
    Rendered(String),
}

impl MultiValue {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(text) if text.trim_start().starts_with('[') => {
                MultiValue::Rendered(text.to_string())
            }
            Some(text) => MultiValue::List(parse_list(text)),
            None => MultiValue::List(Vec::new()),
        }
    }
}

/// A repository as dnf sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DnfRepo {
    pub id: String,
    pub name: String,
    pub baseurl: MultiValue,
    pub mirrorlist: Option<String>,
    pub enabled: bool,
    pub gpgcheck: bool,
    pub gpgkey: MultiValue,
}

impl DnfRepo {
    fn from_section(section: &RepoSection, default_gpgcheck: bool) -> Self {
        let enabled = section.enabled().unwrap_or_else(|err| {
            warn!("repository '{}': {}, using default", section.id, err);
            None
        });
        let gpgcheck = section.gpgcheck().unwrap_or_else(|err| {
            warn!("repository '{}': {}, using default", section.id, err);
            None
        });

        let name = match section.name() {
            Some(name) => name.to_string(),
            None => {
                warn!("repository '{}' is missing name, using id", section.id);
                section.id.clone()
            }
        };

        Self {
            id: section.id.clone(),
            name,
            baseurl: MultiValue::parse(section.baseurl.as_deref()),
            mirrorlist: section.mirrorlist().map(String::from),
            enabled: enabled.unwrap_or(true),
            gpgcheck: gpgcheck.unwrap_or(default_gpgcheck),
            gpgkey: MultiValue::parse(section.gpgkey.as_deref()),
        }
    }
}

/// A read-only dnf session; repositories keep the order they were read in.
#[derive(Clone, Debug, Default)]
pub struct DnfBase {
    repos: Vec<DnfRepo>,
}

impl DnfBase {
    pub fn open(options: &LoadOptions) -> ProbeResult<Self> {
        let mut base = Self::default();
        base.read_all_repos(options)?;
        Ok(base)
    }

    pub fn read_all_repos(&mut self, options: &LoadOptions) -> ProbeResult<()> {
        let config = load_repo_config(BackendKind::Dnf, options)?;
        let default_gpgcheck = config.main.gpgcheck.unwrap_or(false);

        let mut seen: HashSet<String> = self.repos.iter().map(|r| r.id.clone()).collect();
        for section in &config.repos {
            if !seen.insert(section.id.clone()) {
                warn!(
                    "repository '{}' in {} is already defined, skipping",
                    section.id,
                    section.source.display()
                );
                continue;
            }
            self.repos
                .push(DnfRepo::from_section(section, default_gpgcheck));
        }

        debug!("dnf: {} repositories", self.repos.len());
        Ok(())
    }

    pub fn repos(&self) -> &[DnfRepo] {
        &self.repos
    }
}
