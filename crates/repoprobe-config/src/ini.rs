//! Parser for the INI dialect used by yum and dnf configuration files.
//!
//! Sections and entries keep their file order. Keys are case-insensitive and
//! stored lowercased. A line starting with whitespace continues the previous
//! value; continued values are joined with a newline.

use std::path::{Path, PathBuf};

use repoprobe_utils::fs::read_optional;
use tracing::trace;

use crate::error::{ConfigError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniEntry {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniSection {
    pub name: String,
    /// 1-based line of the section header.
    pub line: usize,
    pub entries: Vec<IniEntry>,
}

impl IniSection {
    /// Returns the value of `key`; when a key repeats, the last value wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct IniDocument {
    pub path: PathBuf,
    pub sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn parse<P: Into<PathBuf>>(path: P, content: &str) -> Result<Self> {
        let path = path.into();
        let mut sections: Vec<IniSection> = Vec::new();
        // Continuation is only legal directly after an entry line.
        let mut continuable = false;

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continuable = false;
                continue;
            }

            let indented = raw.starts_with(|c: char| c.is_whitespace());
            if indented && continuable {
                if let Some(entry) = sections.last_mut().and_then(|s| s.entries.last_mut()) {
                    if !entry.value.is_empty() {
                        entry.value.push('\n');
                    }
                    entry.value.push_str(trimmed);
                    continue;
                }
            }

            if trimmed.starts_with('[') {
                // Text after the last `]` is ignored, e.g. `[base]  # note`.
                let Some(name) = trimmed
                    .rfind(']')
                    .map(|end| &trimmed[1..end])
                    .filter(|name| !name.trim().is_empty())
                else {
                    return Err(ConfigError::IniSyntax {
                        path,
                        line: line_no,
                        content: trimmed.to_string(),
                    });
                };
                sections.push(IniSection {
                    name: name.trim().to_string(),
                    line: line_no,
                    entries: Vec::new(),
                });
                continuable = false;
                continue;
            }

            let Some((key, value)) = split_entry(trimmed) else {
                return Err(ConfigError::IniSyntax {
                    path,
                    line: line_no,
                    content: trimmed.to_string(),
                });
            };

            let Some(section) = sections.last_mut() else {
                return Err(ConfigError::EntryOutsideSection {
                    path,
                    line: line_no,
                });
            };

            section.entries.push(IniEntry {
                key: key.to_ascii_lowercase(),
                value: value.to_string(),
            });
            continuable = true;
        }

        trace!(
            "parsed {} section(s) from {}",
            sections.len(),
            path.display()
        );

        Ok(Self { path, sections })
    }

    /// Loads and parses `path`; a missing file yields `None`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        match read_optional(path)? {
            Some(content) => Ok(Some(Self::parse(path, &content)?)),
            None => Ok(None),
        }
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|section| section.name == name)
    }
}

/// Splits `key = value` or `key: value` at whichever delimiter comes first.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let pos = line.find(['=', ':'])?;
    let key = line[..pos].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, line[pos + 1..].trim()))
}
