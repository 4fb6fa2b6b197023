//! Rollback command implementation

use anyhow::Result;
use mg_engine::RollbackOutcome;

use crate::cli::{GlobalArgs, RollbackArgs};
use crate::context::RuntimeContext;

/// Execute the rollback command
pub(crate) async fn execute(args: &RollbackArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    ctx.verbose(&format!("Rolling back to version {}", args.to));

    match ctx.manager.rollback(args.to).await? {
        RollbackOutcome::NoOp { current } => {
            println!(
                "Nothing to roll back: database at version {}, target {}",
                current.unwrap_or(0),
                args.to
            );
        }
        RollbackOutcome::Reverted { count } => {
            println!(
                "Reverted {} migration{}",
                count,
                if count == 1 { "" } else { "s" }
            );
            println!("Database at version {}", args.to);
        }
    }

    Ok(())
}
