//! mg-core - Core library for Migra
//!
//! This crate provides the shared types used across all Migra components:
//! project configuration, migration artifact parsing, and artifact
//! discovery.

pub mod artifact;
pub mod config;
pub mod error;
pub mod source;

pub use artifact::{Artifact, MIGRATION_MARKER, ROLLBACK_MARKER, SQL_SUFFIX};
pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult};
pub use source::{ArtifactSource, DirSource};
