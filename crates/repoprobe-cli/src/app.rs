use repoprobe_config::config::Config;
use repoprobe_core::{
    backend::{Capabilities, HostCapabilities},
    output::write_json,
    ProbeResult,
};
use serde::Serialize;
use tracing::debug;

use crate::{cli::CommonArgs, logging::setup_logging, utils::disable_color};

pub fn install_error_hook() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();
}

/// Loads the user configuration and applies command line overrides.
pub fn load_config(args: &CommonArgs, backend: Option<&str>) -> ProbeResult<Config> {
    let mut config = Config::new(args.config.as_deref())?;

    if let Some(root) = &args.root {
        config.root = Some(root.clone());
    }
    if let Some(backend) = backend {
        config.backend = Some(backend.to_string());
    }
    config.resolve()?;

    Ok(config)
}

/// Runs one collection and prints its records to stdout.
pub fn run<T, F>(args: &CommonArgs, backend: Option<&str>, collect: F) -> ProbeResult<()>
where
    T: Serialize,
    F: FnOnce(&dyn Capabilities, &Config) -> ProbeResult<Vec<T>>,
{
    if args.no_color {
        disable_color();
    }
    setup_logging(args);

    let config = load_config(args, backend)?;
    let root = config.root_path()?;
    debug!("reading configuration under {}", root.display());

    let caps = HostCapabilities::new(root);
    let records = collect(&caps, &config)?;

    let stdout = std::io::stdout();
    write_json(&mut stdout.lock(), &records, args.pretty)
}

/// Reports `result` on stderr and exits nonzero when it is an error.
pub fn exit_on_error(result: ProbeResult<()>) {
    if let Err(err) = result {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
