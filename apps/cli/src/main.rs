//! Brandscope CLI: design token and brand voice extraction.
//!
//! Fetches a page and its stylesheets, derives a bounded design-token
//! document plus a heuristic voice profile, and optionally stores it locally.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
