// SPDX-License-Identifier: GPL-3.0-only
mod cli;
mod config;
mod executor;
mod logging;
mod registrar;
mod utils;

#[cfg(test)]
mod test_helpers;

use clap::Parser;
use tracing::info;

use cli::{Cli, Command};
use config::Config;
use logging::setup_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    setup_logging(&config.log_level, cli.log_json)?;

    info!("Starting extreg v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Register(args) => {
            let json = args.json;
            let report = cli::register::run(args, &config).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", cli::register::render_summary(&report));
            }
        }
    }

    Ok(())
}
