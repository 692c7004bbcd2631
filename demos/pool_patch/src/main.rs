//! Pool patch entry point: load settings, reconcile one pool, print the outcome.

use std::io;

use clap::Parser;

use pool_patch::cli::PoolPatchCli;
use pool_patch::error::{PoolPatchError, Result};
use pool_patch::{execute, telemetry, write_outcome};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    telemetry::init()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let cli = PoolPatchCli::parse();
    let outcome = execute(&cli)?;
    let mut stdout = io::stdout().lock();
    write_outcome(&mut stdout, &cli.id, &outcome).map_err(PoolPatchError::from)
}
