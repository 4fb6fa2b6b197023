//! Init command implementation - scaffolds a new Migra project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs) -> Result<()> {
    scaffold(Path::new("."), args)
}

/// Scaffold the project under `base`
fn scaffold(base: &Path, args: &InitArgs) -> Result<()> {
    // Reject names that could cause path traversal or confusing directory names
    if args.name.contains('/')
        || args.name.contains('\\')
        || args.name.contains("..")
        || args.name.starts_with('.')
        || args.name.starts_with('-')
    {
        anyhow::bail!(
            "Invalid project name '{}': must not contain '/', '\\', '..', or start with '.' or '-'",
            args.name
        );
    }

    let project_dir = base.join(&args.name);

    if project_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Choose a different project name.",
            args.name
        );
    }

    println!("Creating new Migra project: {}\n", args.name);

    fs::create_dir_all(project_dir.join("migrations"))
        .with_context(|| format!("Failed to create directory: {}", args.name))?;

    // Generate migra.yml
    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('"', "\\\"");
    let safe_db_path = args.database_path.replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{name}"
version: "0.1"

migration_path: migrations

database:
  path: "{db_path}"
"#,
        name = safe_name,
        db_path = safe_db_path,
    );
    fs::write(project_dir.join("migra.yml"), config_content)
        .context("Failed to write migra.yml")?;

    // Generate a sample migration artifact
    let sample = "-- migration 1\n\
                  --migration--\n\
                  CREATE TABLE example (\n    id INTEGER,\n    name VARCHAR\n);\n\
                  --rollback--\n\
                  DROP TABLE example;\n";
    fs::write(project_dir.join("migrations/001_example.sql"), sample)
        .context("Failed to write sample migration")?;

    println!("Created:");
    println!("  {}/migra.yml", args.name);
    println!("  {}/migrations/001_example.sql", args.name);
    println!();
    println!("Next steps:");
    println!("  cd {}", args.name);
    println!("  mg migrate");

    Ok(())
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
