//! Literal release version tokens

use crate::core::error::{SyncError, SyncResult};
use serde::Serialize;
use std::fmt;

/// A release version as written into manifests, e.g. `1.25.0` or `1.25.0-alpha1`
///
/// Comparison is plain string equality. `1.25.0` and `1.25.00` are different versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VersionString(String);

impl VersionString {
  /// Validate a requested version
  ///
  /// Requires at least two `.` characters and no whitespace (a space or quote would
  /// break the `version = "..."` line of key-value manifests).
  pub fn parse(raw: &str) -> SyncResult<Self> {
    let invalid = || SyncError::InvalidVersionFormat {
      version: raw.to_string(),
    };

    if raw.matches('.').count() < 2 {
      return Err(invalid());
    }
    if raw.chars().any(|c| c.is_whitespace() || c == '"') {
      return Err(invalid());
    }

    Ok(Self(raw.to_string()))
  }

  /// Wrap a version read back from a manifest, without format checks
  pub(crate) fn from_manifest(raw: impl Into<String>) -> Self {
    Self(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Whether any of `markers` appears in the version (e.g. "alpha")
  pub fn contains_any(&self, markers: &[String]) -> bool {
    markers.iter().any(|m| !m.is_empty() && self.0.contains(m.as_str()))
  }

  /// Best-effort semver view, only used for advisory warnings
  pub fn as_semver(&self) -> Option<semver::Version> {
    semver::Version::parse(&self.0).ok()
  }
}

impl fmt::Display for VersionString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
