//! Info command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;

/// Execute the info command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;

    let current = ctx.manager.current_version().await?;
    let statuses = ctx.manager.status().await?;

    println!("Project: {}", ctx.config.name);
    println!("Database version: {}", current.unwrap_or(0));
    println!();

    if statuses.is_empty() {
        println!("No migration artifacts found");
        return Ok(());
    }

    for status in &statuses {
        let marker = if status.applied { "✓ applied" } else { "  pending" };
        println!("  v{:<4} {}  {}", status.version, marker, status.name);
    }

    let pending = statuses.iter().filter(|s| !s.applied).count();
    println!();
    println!(
        "{} artifact{}, {} pending",
        statuses.len(),
        if statuses.len() == 1 { "" } else { "s" },
        pending
    );

    Ok(())
}
