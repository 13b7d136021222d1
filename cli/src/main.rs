mod cli;
mod commands;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use choropleth::{LoadError, MapConfig};
use cli::{Cli, Commands};
use commands::{attributes, breaks, render};

/// Map `-v` count to a default level; `RUST_LOG` still wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn load_config(cli: &Cli) -> Result<MapConfig> {
    match &cli.config {
        Some(path) => MapConfig::from_path(path)
            .map_err(|source| LoadError::Config { path: path.clone(), source }.into()),
        None => Ok(MapConfig::default()),
    }
}

pub fn run() -> Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    match &cli.command {
        Commands::Attributes => attributes::run(&config),
        Commands::Breaks(args) => breaks::run(&config, args),
        Commands::Render(args) => render::run(&config, args),
    }
}

fn main() -> Result<()> { run() }
