//! mg-engine - The Migra migration engine
//!
//! This crate holds the parts with real invariants: the history ledger
//! (which versions are applied), the executor (one artifact's statements
//! plus the paired ledger mutation), and the manager (discovery, ordering,
//! skip checks, and the run-scoped all-or-nothing transaction).

pub mod error;
pub mod executor;
pub mod ledger;
pub mod manager;

pub use error::{EngineError, EngineResult};
pub use executor::MigrationExecutor;
pub use ledger::Ledger;
pub use manager::{ArtifactStatus, MigrateOutcome, MigrationManager, RollbackOutcome};
