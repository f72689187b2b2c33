//! The two collection pipelines: probe, enumerate, map.

use repoprobe_config::{config::Config, layout::BackendKind, loader::LoadOptions};
use tracing::debug;

use crate::{
    backend::{require_yum, select_backend, Capabilities},
    dnf::DnfBase,
    mapper::{legacy_record, unified_from_dnf, unified_from_yum},
    record::{LegacyRecord, UnifiedRecord},
    yum::YumBase,
    ProbeResult,
};

/// A backend session that can list its repositories as unified records.
pub trait RepositorySource {
    fn enumerate_repositories(&self) -> ProbeResult<Vec<UnifiedRecord>>;
}

impl RepositorySource for YumBase {
    fn enumerate_repositories(&self) -> ProbeResult<Vec<UnifiedRecord>> {
        Ok(self.sort().into_iter().map(unified_from_yum).collect())
    }
}

impl RepositorySource for DnfBase {
    fn enumerate_repositories(&self) -> ProbeResult<Vec<UnifiedRecord>> {
        self.repos().iter().map(unified_from_dnf).collect()
    }
}

/// The backend chosen for this run.
pub enum Session {
    Yum(YumBase),
    Dnf(DnfBase),
}

impl Session {
    pub fn open(kind: BackendKind, options: &LoadOptions) -> ProbeResult<Self> {
        debug!("opening {} session under {}", kind, options.root.display());
        Ok(match kind {
            BackendKind::Yum => Session::Yum(YumBase::open(options)?),
            BackendKind::Dnf => Session::Dnf(DnfBase::open(options)?),
        })
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Session::Yum(_) => BackendKind::Yum,
            Session::Dnf(_) => BackendKind::Dnf,
        }
    }
}

impl RepositorySource for Session {
    fn enumerate_repositories(&self) -> ProbeResult<Vec<UnifiedRecord>> {
        match self {
            Session::Yum(base) => base.enumerate_repositories(),
            Session::Dnf(base) => base.enumerate_repositories(),
        }
    }
}

/// Lists yum repositories in the legacy record shape.
pub fn collect_legacy(caps: &dyn Capabilities, config: &Config) -> ProbeResult<Vec<LegacyRecord>> {
    require_yum(caps, config.backend()?)?;

    let yum = YumBase::open(&config.load_options()?)?;
    let records: Vec<_> = yum.sort().into_iter().map(legacy_record).collect();

    debug!("collected {} repositories", records.len());
    Ok(records)
}

/// Lists repositories of yum, or dnf when yum is absent.
pub fn collect_unified(
    caps: &dyn Capabilities,
    config: &Config,
) -> ProbeResult<Vec<UnifiedRecord>> {
    let kind = select_backend(caps, config.backend()?)?;
    let session = Session::open(kind, &config.load_options()?)?;
    let records = session.enumerate_repositories()?;

    debug!(
        "collected {} repositories from {}",
        records.len(),
        session.kind()
    );
    Ok(records)
}
