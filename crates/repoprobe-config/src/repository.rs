use std::{path::PathBuf, sync::LazyLock};

use regex::Regex;

use crate::{
    error::{ConfigError, Result},
    ini::IniSection,
    vars::Variables,
};

static REPO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.:-]+$").expect("unable to compile repository id regex")
});

pub fn is_valid_repo_id(id: &str) -> bool {
    REPO_ID_RE.is_match(id)
}

/// Parses a yum/dnf boolean option value.
pub fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBoolean {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Splits a list option on whitespace, newlines and commas.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// The options of `[main]` that affect repository enumeration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MainSection {
    pub reposdir: Option<Vec<String>>,
    pub gpgcheck: Option<bool>,
}

impl MainSection {
    pub fn from_section(section: &IniSection, vars: &Variables) -> Result<Self> {
        let reposdir = section
            .get("reposdir")
            .map(|value| parse_list(&vars.substitute(value)));
        let gpgcheck = section
            .get("gpgcheck")
            .map(|value| parse_bool("gpgcheck", value))
            .transpose()?;

        Ok(Self { reposdir, gpgcheck })
    }
}

/// One repository section with variables already substituted.
///
/// Option values are kept as text so each backend can apply its own
/// interpretation and error policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoSection {
    pub id: String,
    pub source: PathBuf,
    pub name: Option<String>,
    pub baseurl: Option<String>,
    pub mirrorlist: Option<String>,
    pub enabled: Option<String>,
    pub gpgcheck: Option<String>,
    pub gpgkey: Option<String>,
}

impl RepoSection {
    pub fn from_section<P: Into<PathBuf>>(
        section: &IniSection,
        source: P,
        vars: &Variables,
    ) -> Result<Self> {
        if !is_valid_repo_id(&section.name) {
            return Err(ConfigError::InvalidRepositoryId(section.name.clone()));
        }

        let option = |key: &str| section.get(key).map(|value| vars.substitute(value));

        Ok(Self {
            id: section.name.clone(),
            source: source.into(),
            name: option("name"),
            baseurl: option("baseurl"),
            mirrorlist: option("mirrorlist"),
            enabled: option("enabled"),
            gpgcheck: option("gpgcheck"),
            gpgkey: option("gpgkey"),
        })
    }

    pub fn enabled(&self) -> Result<Option<bool>> {
        self.enabled
            .as_deref()
            .map(|value| parse_bool("enabled", value))
            .transpose()
    }

    pub fn gpgcheck(&self) -> Result<Option<bool>> {
        self.gpgcheck
            .as_deref()
            .map(|value| parse_bool("gpgcheck", value))
            .transpose()
    }

    /// The mirror list URL, `None` when unset or blank.
    pub fn mirrorlist(&self) -> Option<&str> {
        self.mirrorlist
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// The configured name, `None` when unset or blank.
    pub fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
