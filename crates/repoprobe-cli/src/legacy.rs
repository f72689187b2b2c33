use app::{exit_on_error, install_error_hook, run};
use clap::Parser;
use cli::LegacyArgs;
use repoprobe_core::collector::collect_legacy;

mod app;
mod cli;
mod logging;
mod utils;

fn main() {
    install_error_hook();

    let args = LegacyArgs::parse();
    exit_on_error(run(&args.common, None, collect_legacy));
}
