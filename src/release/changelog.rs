//! Changelog gate: a release must be documented before its manifests change
//!
//! The check is deliberately literal. It looks for one line equal to
//! `## [<version>] - <YYYY-MM-DD>` and ignores everything else in the file.

use crate::core::error::{SyncError, SyncResult};
use crate::core::version::VersionString;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a successful changelog check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangelogCheck {
  /// The dated heading was found
  Documented,
  /// The version carries an exempt marker (e.g. "alpha")
  Exempt,
}

/// Validates that a changelog documents a release
pub struct ChangelogValidator {
  path: PathBuf,
  exempt_markers: Vec<String>,
}

impl ChangelogValidator {
  pub fn new(path: impl Into<PathBuf>, exempt_markers: Vec<String>) -> Self {
    Self {
      path: path.into(),
      exempt_markers,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// The heading line a release needs
  pub fn expected_heading(version: &VersionString, date: NaiveDate) -> String {
    format!("## [{}] - {}", version, date.format("%Y-%m-%d"))
  }

  /// Check the changelog for `version` released on `date`
  ///
  /// Exempt versions return without reading the file.
  pub fn validate(&self, version: &VersionString, date: NaiveDate) -> SyncResult<ChangelogCheck> {
    if version.contains_any(&self.exempt_markers) {
      tracing::debug!(%version, "pre-release version, changelog check skipped");
      return Ok(ChangelogCheck::Exempt);
    }

    let missing = || SyncError::MissingChangelogEntry {
      changelog: self.path.clone(),
      version: version.to_string(),
      date: date.format("%Y-%m-%d").to_string(),
    };

    let content = match fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(missing()),
      Err(e) => return Err(e.into()),
    };

    let heading = Self::expected_heading(version, date);
    if content.lines().any(|line| line == heading) {
      Ok(ChangelogCheck::Documented)
    } else {
      Err(missing())
    }
  }
}
