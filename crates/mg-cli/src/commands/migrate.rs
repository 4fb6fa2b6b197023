//! Migrate command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;

/// Execute the migrate command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    ctx.verbose(&format!(
        "Migrating project '{}' from {}",
        ctx.config.name,
        ctx.root.join(&ctx.config.migration_path).display()
    ));

    let outcome = ctx.manager.migrate().await?;
    let current = ctx.manager.current_version().await?;

    println!(
        "Applied {} migration{}, skipped {} already applied",
        outcome.applied,
        if outcome.applied == 1 { "" } else { "s" },
        outcome.skipped
    );
    println!("Database at version {}", current.unwrap_or(0));

    Ok(())
}
