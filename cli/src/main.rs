mod cli;
mod commands;
mod fetch_ui;
mod format;
mod interactive;
mod output;

use clap::Parser;
use tiosa::{config, error::Result};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let cfg = match &args.config {
        Some(path) => config::Config::load_from_path(path)?,
        None => config::Config::load(),
    }
    .with_env_overrides();

    cli::handle_args(args, &cfg)
}
