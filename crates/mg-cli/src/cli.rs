//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Migra - versioned SQL migrations for DuckDB
#[derive(Parser, Debug)]
#[command(name = "mg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database path
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new Migra project
    Init(InitArgs),

    /// Apply all pending migrations
    Migrate,

    /// Revert applied migrations down to a target version
    Rollback(RollbackArgs),

    /// Show the current database version and per-artifact status
    Info,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the project directory to create
    pub name: String,

    /// Database file path written into the generated config
    #[arg(long, default_value = "migra.duckdb")]
    pub database_path: String,
}

/// Arguments for the rollback command
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Target version to roll back to (0 reverts everything)
    #[arg(long)]
    pub to: i64,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
