//! Hazard CLI - calibrates CDS hazard rate curves.
//!
//! # Usage
//!
//! ```bash
//! # Write an example calibration file
//! hazard template > acme.toml
//!
//! # Calibrate it
//! hazard calibrate acme.toml
//!
//! # Machine-readable output
//! hazard calibrate acme.toml --format json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Calibrate(args) => commands::calibrate::execute(args, cli.format)?,
        Commands::Template(args) => commands::template::execute(&args)?,
    }

    Ok(())
}
