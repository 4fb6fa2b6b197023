//! Migra CLI - versioned SQL migrations for DuckDB

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::{info, init, migrate, rollback};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Init(args) => init::execute(args).await,
        cli::Commands::Migrate => migrate::execute(&cli.global).await,
        cli::Commands::Rollback(args) => rollback::execute(args, &cli.global).await,
        cli::Commands::Info => info::execute(&cli.global).await,
    }
}
