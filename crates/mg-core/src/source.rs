//! Artifact discovery.
//!
//! The engine never touches the filesystem directly; it lists and reads
//! artifacts through the [`ArtifactSource`] trait so that tests and other
//! packagings can inject their own lister. [`DirSource`] is the filesystem
//! implementation used by the CLI.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Ordered access to migration artifacts.
pub trait ArtifactSource: Send + Sync {
    /// List artifact names in ascending lexical order.
    ///
    /// Names are expected to sort consistently with version order; that is
    /// a naming convention maintained by the project, not verified here.
    fn list(&self) -> CoreResult<Vec<String>>;

    /// Read one artifact's content by name.
    fn read(&self, name: &str) -> CoreResult<String>;
}

/// Filesystem-backed artifact source rooted at a migration directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSource for DirSource {
    fn list(&self) -> CoreResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| CoreError::Discovery {
            path: self.root.display().to_string(),
            message: e.to_string(),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CoreError::Discovery {
                path: self.root.display().to_string(),
                message: e.to_string(),
            })?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        log::debug!(
            "Listed {} artifacts in {}",
            names.len(),
            self.root.display()
        );
        Ok(names)
    }

    fn read(&self, name: &str) -> CoreResult<String> {
        let path = self.root.join(name);
        std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
