//! Go struct generation tool.
//!
//! This binary connects to a database, enumerates the tables of one
//! schema, and writes one Go file per table containing a matching
//! struct definition.

use anyhow::Context;
use clap::Parser;
use dbscribe_core::init_logging;
use dbscribe_gen::cli::Cli;
use dbscribe_gen::generate;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    if cli.list_dialects {
        generate::list_dialects();
        return Ok(());
    }

    generate::run(&cli)
        .await
        .inspect_err(|e| error!("{e}"))
        .context("struct generation failed")?;

    Ok(())
}
