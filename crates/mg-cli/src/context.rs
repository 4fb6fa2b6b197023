//! Runtime context for CLI commands

use anyhow::{Context, Result};
use mg_core::{Config, DirSource};
use mg_db::{Database, DuckDbBackend};
use mg_engine::MigrationManager;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Runtime context containing the loaded config, the database connection,
/// and the migration manager built over them
pub struct RuntimeContext {
    /// The loaded project config
    pub config: Config,

    /// Project root directory
    pub root: PathBuf,

    /// Migration manager driving the run
    pub manager: MigrationManager,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub async fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        // Load config from custom path or project directory
        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        // Create database connection
        let db_path = resolve_db_path(&root, args.target.as_deref().unwrap_or(&config.database.path));
        let db: Arc<dyn Database> =
            Arc::new(DuckDbBackend::new(&db_path).context("Failed to connect to database")?);

        let source = DirSource::new(root.join(&config.migration_path));
        let manager = MigrationManager::new(db, Box::new(source))
            .await
            .context("Failed to initialize migration history table")?;

        Ok(Self {
            config,
            root,
            manager,
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}

/// Resolve a database path relative to the project root, leaving `:memory:`
/// and absolute paths untouched.
fn resolve_db_path(root: &Path, db_path: &str) -> String {
    if db_path == ":memory:" || Path::new(db_path).is_absolute() {
        db_path.to_string()
    } else {
        root.join(db_path).display().to_string()
    }
}
