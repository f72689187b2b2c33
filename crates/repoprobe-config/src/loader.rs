use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
};

use repoprobe_utils::{
    fs::{files_with_extension, read_optional},
    path::reroot,
    system::{arch, basearch},
};
use tracing::{debug, warn};

use crate::{
    error::Result,
    ini::IniDocument,
    layout::{BackendKind, Layout},
    repository::{MainSection, RepoSection},
    vars::{releasever_from_os_release, Variables},
};

/// Inputs that adjust how a backend's configuration is read.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Prefix for every configuration path.
    pub root: PathBuf,
    pub releasever: Option<String>,
    /// Replaces the `reposdir` of `[main]`.
    pub reposdir: Option<Vec<PathBuf>>,
    /// Applied after every other variable source.
    pub vars: HashMap<String, String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/"),
            releasever: None,
            reposdir: None,
            vars: HashMap::new(),
        }
    }
}

/// Everything read from a backend's configuration, in read order.
#[derive(Clone, Debug)]
pub struct RepoConfig {
    pub main: MainSection,
    pub vars: Variables,
    /// Repository sections from the main config file first, then from each
    /// repository directory. Duplicate ids are kept; backends decide.
    pub repos: Vec<RepoSection>,
}

pub fn load_repo_config(kind: BackendKind, options: &LoadOptions) -> Result<RepoConfig> {
    let layout = kind.layout();
    let vars = load_variables(&layout, options)?;

    let main_path = reroot(&options.root, &layout.main_config);
    let main_doc = IniDocument::load(&main_path)?;
    let main = match main_doc.as_ref().and_then(|doc| doc.section("main")) {
        Some(section) => MainSection::from_section(section, &vars)?,
        None => {
            debug!("no [main] section in {}", main_path.display());
            MainSection::default()
        }
    };

    let mut repos = Vec::new();
    if let Some(doc) = &main_doc {
        collect_sections(doc, &vars, &mut repos);
    }

    let reposdirs: Vec<PathBuf> = match (&options.reposdir, &main.reposdir) {
        (Some(dirs), _) => dirs.clone(),
        (None, Some(dirs)) => dirs.iter().map(PathBuf::from).collect(),
        (None, None) => layout.default_reposdirs.clone(),
    };

    let mut seen_dirs = HashSet::new();
    for dir in reposdirs {
        let dir = reroot(&options.root, dir);
        if !seen_dirs.insert(dir.clone()) {
            continue;
        }
        for file in files_with_extension(&dir, "repo")? {
            if let Some(doc) = IniDocument::load(&file)? {
                collect_sections(&doc, &vars, &mut repos);
            }
        }
    }

    debug!(
        "{} backend: read {} repository section(s)",
        kind,
        repos.len()
    );

    Ok(RepoConfig { main, vars, repos })
}

fn load_variables(layout: &Layout, options: &LoadOptions) -> Result<Variables> {
    let mut vars = Variables::with_arch(&arch(), &basearch());

    let os_release = reroot(&options.root, "/etc/os-release");
    if let Some(releasever) = read_optional(&os_release)?
        .as_deref()
        .and_then(releasever_from_os_release)
    {
        vars.insert("releasever", releasever);
    }

    for dir in &layout.varsdirs {
        vars.load_dir(reroot(&options.root, dir))?;
    }
    vars.load_env(layout.env_prefix);

    if let Some(releasever) = &options.releasever {
        vars.insert("releasever", releasever.as_str());
    }
    for (name, value) in &options.vars {
        vars.insert(name.as_str(), value.as_str());
    }
    debug!("{} substitution variable(s)", vars.len());

    Ok(vars)
}

fn collect_sections(doc: &IniDocument, vars: &Variables, repos: &mut Vec<RepoSection>) {
    for section in doc.sections.iter().filter(|s| s.name != "main") {
        match RepoSection::from_section(section, &doc.path, vars) {
            Ok(repo) => repos.push(repo),
            Err(err) => warn!(
                "{} in {} line {}, skipping",
                err,
                doc.path.display(),
                section.line
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ConfigError, test_utils::ScopedEnv};
    use serial_test::serial;
    use std::{fs, path::Path};
    use tempfile::{tempdir, TempDir};

    fn write(root: &Path, path: &str, content: &str) {
        let path = reroot(root, path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn options(root: &TempDir) -> LoadOptions {
        LoadOptions {
            root: root.path().to_path_buf(),
            ..LoadOptions::default()
        }
    }

    #[test]
    #[serial]
    fn test_load_reads_main_then_reposdir_in_file_order() {
        let root = tempdir().unwrap();
        write(
            root.path(),
            "/etc/yum.conf",
            "[main]\ngpgcheck=1\n\n[local]\nname=Local\nbaseurl=file:///srv/local\n",
        );
        write(
            root.path(),
            "/etc/yum.repos.d/zeta.repo",
            "[zeta]\nname=Zeta\nbaseurl=http://zeta/\n",
        );
        write(
            root.path(),
            "/etc/yum.repos.d/alpha.repo",
            "[alpha-2]\nname=A2\n\n[alpha-1]\nname=A1\n",
        );

        let config = load_repo_config(BackendKind::Yum, &options(&root)).unwrap();
        let ids: Vec<_> = config.repos.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["local", "alpha-2", "alpha-1", "zeta"]);
        assert_eq!(config.main.gpgcheck, Some(true));
    }

    #[test]
    #[serial]
    fn test_load_missing_configuration_is_empty() {
        let root = tempdir().unwrap();
        let config = load_repo_config(BackendKind::Dnf, &options(&root)).unwrap();
        assert!(config.repos.is_empty());
        assert_eq!(config.main, MainSection::default());
    }

    #[test]
    #[serial]
    fn test_load_honours_main_reposdir() {
        let root = tempdir().unwrap();
        write(
            root.path(),
            "/etc/dnf/dnf.conf",
            "[main]\nreposdir=/opt/repos\n",
        );
        write(root.path(), "/opt/repos/custom.repo", "[custom]\nname=Custom\n");
        write(root.path(), "/etc/yum.repos.d/ignored.repo", "[ignored]\nname=Ignored\n");

        let config = load_repo_config(BackendKind::Dnf, &options(&root)).unwrap();
        let ids: Vec<_> = config.repos.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["custom"]);
    }

    #[test]
    #[serial]
    fn test_load_reposdir_override() {
        let root = tempdir().unwrap();
        write(root.path(), "/etc/yum.repos.d/default.repo", "[default]\nname=D\n");
        write(root.path(), "/srv/other/other.repo", "[other]\nname=O\n");

        let mut opts = options(&root);
        opts.reposdir = Some(vec![PathBuf::from("/srv/other")]);
        let config = load_repo_config(BackendKind::Yum, &opts).unwrap();
        let ids: Vec<_> = config.repos.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["other"]);
    }

    #[test]
    #[serial]
    fn test_load_variables_precedence() {
        let root = tempdir().unwrap();
        write(root.path(), "/etc/os-release", "NAME=CentOS\nVERSION_ID=\"8\"\n");
        write(root.path(), "/etc/dnf/vars/contentdir", "centos\n");
        write(root.path(), "/etc/yum/vars/contentdir", "altarch\n");
        write(
            root.path(),
            "/etc/yum.repos.d/base.repo",
            "[base]\nname=Base $releasever\nbaseurl=http://vault/$contentdir/$releasever/$basearch/$DNF0\n",
        );
        let _env = ScopedEnv::new(&[("DNF0", Some("extra"))]);

        let config = load_repo_config(BackendKind::Dnf, &options(&root)).unwrap();
        let base = &config.repos[0];
        assert_eq!(base.name(), Some("Base 8"));
        assert_eq!(
            base.baseurl.as_deref(),
            Some(format!("http://vault/altarch/8/{}/extra", basearch()).as_str())
        );

        let mut opts = options(&root);
        opts.releasever = Some("8-stream".to_string());
        opts.vars.insert("contentdir".to_string(), "vault".to_string());
        let config = load_repo_config(BackendKind::Dnf, &opts).unwrap();
        assert_eq!(config.vars.get("releasever"), Some("8-stream"));
        assert_eq!(config.vars.get("contentdir"), Some("vault"));
    }

    #[test]
    #[serial]
    fn test_load_skips_invalid_ids_and_main_sections() {
        let root = tempdir().unwrap();
        write(
            root.path(),
            "/etc/yum.repos.d/mixed.repo",
            "[main]\ngpgcheck=1\n[bad id]\nname=Bad\n[good]\nname=Good\n",
        );

        let config = load_repo_config(BackendKind::Yum, &options(&root)).unwrap();
        let ids: Vec<_> = config.repos.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["good"]);
    }

    #[test]
    #[serial]
    fn test_load_syntax_error_is_fatal() {
        let root = tempdir().unwrap();
        write(root.path(), "/etc/yum.repos.d/broken.repo", "[broken\n");

        let result = load_repo_config(BackendKind::Yum, &options(&root));
        assert!(matches!(result, Err(ConfigError::IniSyntax { .. })));
    }
}
