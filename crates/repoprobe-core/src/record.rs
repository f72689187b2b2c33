use serde::Serialize;

/// Value of the `type` field of every record.
pub const REPO_TYPE: &str = "rpm-md";

/// Value of the `package_manager` field of legacy records.
pub const LEGACY_PACKAGE_MANAGER: &str = "yum";

/// A field that is a string on one backend and a list on the other.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Record emitted by `yum-repositories-legacy`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegacyRecord {
    pub alias: String,
    pub name: String,
    #[serde(rename = "type")]
    pub repo_type: String,
    /// First base URL, or empty.
    pub url: String,
    pub enabled: bool,
    pub gpgcheck: bool,
    pub package_manager: String,
}

/// Record emitted by `yum-repositories`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnifiedRecord {
    pub alias: String,
    pub name: String,
    #[serde(rename = "type")]
    pub repo_type: String,
    pub url: Vec<String>,
    /// `""` or the URL on yum; the URL or `[]` on dnf.
    pub mirrorlist: FieldValue,
    pub enabled: bool,
    pub gpgcheck: bool,
    pub gpgkey: Vec<String>,
}
