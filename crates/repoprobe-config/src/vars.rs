use std::{collections::HashMap, path::Path, sync::LazyLock};

use regex::Regex;
use repoprobe_utils::fs::{list_files, read_optional};
use tracing::debug;

use crate::error::Result;

static VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z0-9_]+)\}|([A-Za-z0-9_]+))")
        .expect("unable to compile variable regex")
});

/// Substitution variables such as `$releasever` and `$basearch`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Variables {
    values: HashMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `arch` and `basearch`.
    pub fn with_arch(arch: &str, basearch: &str) -> Self {
        let mut vars = Self::new();
        vars.insert("arch", arch);
        vars.insert("basearch", basearch);
        vars
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    /// Loads one variable per file in `dir`: the file name is the variable
    /// name and the first line its value. A missing directory is skipped.
    pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        for file in list_files(dir)? {
            let Some(name) = file.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(content) = read_optional(&file)? else {
                continue;
            };
            let value = content.lines().next().unwrap_or_default().trim();
            debug!("variable ${} = {:?} from {}", name, value, file.display());
            self.insert(name, value);
        }
        Ok(())
    }

    /// Loads `<prefix>0` through `<prefix>9` from the process environment.
    pub fn load_env(&mut self, prefix: &str) {
        for idx in 0..10 {
            let name = format!("{prefix}{idx}");
            if let Ok(value) = std::env::var(&name) {
                self.insert(name, value);
            }
        }
    }

    /// Replaces `$name` and `${name}` with known values; unknown variables
    /// are left as written.
    pub fn substitute(&self, text: &str) -> String {
        if !text.contains('$') {
            return text.to_string();
        }

        VAR_RE
            .replace_all(text, |caps: &regex::Captures| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                match self.values.get(name) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Derives `$releasever` from os-release content: the major component of
/// `VERSION_ID`, so `9.4` yields `9`.
pub fn releasever_from_os_release(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.trim().strip_prefix("VERSION_ID=")?;
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        let major = value.split('.').next().unwrap_or_default();
        (!major.is_empty()).then(|| major.to_string())
    })
}
