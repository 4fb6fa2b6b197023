//! Migration artifact parsing.
//!
//! An artifact is a single `.sql` file holding one migration: a header line
//! carrying the version number, a forward section, and a reverse section
//! introduced by the `--rollback--` marker. Parsing is a pure function of
//! the artifact name and content; no I/O happens here.

use crate::error::{CoreError, CoreResult};

/// Marker line opening the forward section.
pub const MIGRATION_MARKER: &str = "--migration--";

/// Marker line opening the reverse (rollback) section.
pub const ROLLBACK_MARKER: &str = "--rollback--";

/// Required artifact file suffix.
pub const SQL_SUFFIX: &str = ".sql";

/// A parsed migration artifact.
///
/// `forward` and `reverse` hold trimmed, non-empty SQL statements in file
/// order. Either sequence may be empty (a no-op section is legal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Storage key, e.g. the file name.
    pub name: String,

    /// Version number extracted from the first line.
    pub version: i64,

    /// Statements executed on migrate, in file order.
    pub forward: Vec<String>,

    /// Statements executed on rollback, in file order.
    pub reverse: Vec<String>,
}

impl Artifact {
    /// Parse an artifact from its name and raw content.
    ///
    /// The name must end in `.sql` and the first line must contain a run of
    /// digits (the version); both are rejected with
    /// [`CoreError::InvalidArtifact`] before any statement is produced.
    ///
    /// Forward text is everything between the header line and the
    /// `--rollback--` marker; a `--migration--` marker line anywhere is
    /// treated as a section delimiter and excluded. Reverse text is
    /// everything after `--rollback--`.
    pub fn parse(name: &str, content: &str) -> CoreResult<Self> {
        if !name.ends_with(SQL_SUFFIX) {
            return Err(CoreError::InvalidArtifact {
                name: name.to_string(),
                reason: format!("wrong file extension; only '{}' is supported", SQL_SUFFIX),
            });
        }

        let mut lines = content.lines();
        let header = lines.next().unwrap_or("");
        let version = extract_version(header).ok_or_else(|| CoreError::InvalidArtifact {
            name: name.to_string(),
            reason: "no version number found on the first line".to_string(),
        })?;

        let mut forward_text = String::new();
        let mut reverse_text = String::new();
        let mut in_reverse = false;
        for line in lines {
            let trimmed = line.trim();
            if trimmed == ROLLBACK_MARKER {
                in_reverse = true;
                continue;
            }
            if trimmed == MIGRATION_MARKER {
                continue;
            }
            let section = if in_reverse {
                &mut reverse_text
            } else {
                &mut forward_text
            };
            section.push_str(line);
            section.push('\n');
        }

        Ok(Self {
            name: name.to_string(),
            version,
            forward: split_statements(&forward_text),
            reverse: split_statements(&reverse_text),
        })
    }
}

/// Extract the first contiguous digit run from a line as the version.
fn extract_version(line: &str) -> Option<i64> {
    let digits: String = line
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Split a SQL blob on `;`, trim fragments, and drop blanks.
fn split_statements(blob: &str) -> Vec<String> {
    blob.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[path = "artifact_test.rs"]
mod tests;
