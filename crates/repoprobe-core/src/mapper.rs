//! Conversion of backend repositories into output records.

use crate::{
    dnf::{DnfRepo, MultiValue},
    error::ProbeError,
    record::{FieldValue, LegacyRecord, UnifiedRecord, LEGACY_PACKAGE_MANAGER, REPO_TYPE},
    yum::YumRepo,
    ProbeResult,
};

pub fn legacy_record(repo: &YumRepo) -> LegacyRecord {
    LegacyRecord {
        alias: repo.id.clone(),
        name: repo.name.clone(),
        repo_type: REPO_TYPE.to_string(),
        url: repo.baseurl.first().cloned().unwrap_or_default(),
        enabled: repo.enabled,
        gpgcheck: repo.gpgcheck,
        package_manager: LEGACY_PACKAGE_MANAGER.to_string(),
    }
}

pub fn unified_from_yum(repo: &YumRepo) -> UnifiedRecord {
    UnifiedRecord {
        alias: repo.id.clone(),
        name: repo.name.clone(),
        repo_type: REPO_TYPE.to_string(),
        url: repo.baseurl.clone(),
        mirrorlist: FieldValue::Text(repo.mirrorlist.clone().unwrap_or_default()),
        enabled: repo.enabled,
        gpgcheck: repo.gpgcheck,
        gpgkey: repo.gpgkey.clone(),
    }
}

pub fn unified_from_dnf(repo: &DnfRepo) -> ProbeResult<UnifiedRecord> {
    let mirrorlist = match &repo.mirrorlist {
        Some(url) => FieldValue::Text(url.clone()),
        None => FieldValue::List(Vec::new()),
    };

    Ok(UnifiedRecord {
        alias: repo.id.clone(),
        name: repo.name.clone(),
        repo_type: REPO_TYPE.to_string(),
        url: resolve_multi_value(&repo.id, "baseurl", &repo.baseurl)?,
        mirrorlist,
        enabled: repo.enabled,
        gpgcheck: repo.gpgcheck,
        gpgkey: resolve_multi_value(&repo.id, "gpgkey", &repo.gpgkey)?,
    })
}

pub fn resolve_multi_value(
    repo: &str,
    field: &'static str,
    value: &MultiValue,
) -> ProbeResult<Vec<String>> {
    match value {
        MultiValue::List(items) => Ok(items.clone()),
        MultiValue::Rendered(text) => {
            parse_vector_text(text).map_err(|source| ProbeError::VectorWrapper {
                repo: repo.to_string(),
                field,
                source,
            })
        }
    }
}

/// Parses rendered vector text such as `['a', 'b']` into its items.
pub fn parse_vector_text(text: &str) -> Result<Vec<String>, serde_json::Error> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&text.replace('\'', "\""))
}
