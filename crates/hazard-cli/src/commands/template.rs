//! Template command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::TEMPLATE;
use crate::output::print_success;

/// Arguments for the template command.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Write to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the template command.
pub fn execute(args: &TemplateArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            std::fs::write(path, TEMPLATE).with_context(|| format!("writing {}", path.display()))?;
            print_success(&format!("Wrote {}", path.display()));
        }
        None => print!("{TEMPLATE}"),
    }
    Ok(())
}
