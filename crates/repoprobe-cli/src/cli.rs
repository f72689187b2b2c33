use clap::{ArgAction, Parser, ValueHint};

/// Flags shared by both executables.
#[derive(clap::Args, Debug, Default)]
pub struct CommonArgs {
    /// Set log verbosity
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colors in log output
    #[arg(long)]
    pub no_color: bool,

    /// Log as json
    #[arg(long)]
    pub json_logs: bool,

    /// Provide custom config file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    /// Read configuration below this installroot
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub root: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// List configured yum or dnf repositories as JSON
#[derive(Parser, Debug)]
#[command(name = "yum-repositories", author, version, about)]
pub struct UnifiedArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Use this backend instead of probing for one
    #[arg(short, long, value_parser = ["yum", "dnf"])]
    pub backend: Option<String>,
}

/// List configured yum repositories as JSON
#[derive(Parser, Debug)]
#[command(name = "yum-repositories-legacy", author, version, about)]
pub struct LegacyArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = UnifiedArgs::try_parse_from(["yum-repositories"]).unwrap();
        assert_eq!(args.common.verbose, 0);
        assert!(args.backend.is_none());
        assert!(!args.common.pretty);

        let args = LegacyArgs::try_parse_from(["yum-repositories-legacy"]).unwrap();
        assert!(args.common.root.is_none());
    }

    #[test]
    fn test_flags() {
        let args = UnifiedArgs::try_parse_from([
            "yum-repositories",
            "-vv",
            "--pretty",
            "--root",
            "/mnt/sysimage",
            "-b",
            "dnf",
        ])
        .unwrap();
        assert_eq!(args.common.verbose, 2);
        assert!(args.common.pretty);
        assert_eq!(args.common.root.as_deref(), Some("/mnt/sysimage"));
        assert_eq!(args.backend.as_deref(), Some("dnf"));
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(UnifiedArgs::try_parse_from(["yum-repositories", "-b", "apt"]).is_err());
        assert!(LegacyArgs::try_parse_from(["yum-repositories-legacy", "-b", "dnf"]).is_err());
    }
}
