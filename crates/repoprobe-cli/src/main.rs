use app::{exit_on_error, install_error_hook, run};
use clap::Parser;
use cli::UnifiedArgs;
use repoprobe_core::collector::collect_unified;

mod app;
mod cli;
mod logging;
mod utils;

fn main() {
    install_error_hook();

    let args = UnifiedArgs::parse();
    exit_on_error(run(&args.common, args.backend.as_deref(), collect_unified));
}
