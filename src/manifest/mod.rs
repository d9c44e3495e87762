//! Manifest reading and rewriting
//!
//! Two manifest families carry a release version:
//!
//! - **key-value**: `Cargo.toml`, `pyproject.toml`. Patched line by line so that
//!   comments, ordering and formatting of unrelated content never change.
//! - **json**: `package.json`. Parsed, mutated and re-serialized with sorted keys.
//!
//! All writes go through [`atomic::write_atomic`], so a reader never observes a
//! half-written manifest.

pub mod atomic;
pub mod document;
pub mod key_value;

use crate::core::error::{SyncError, SyncResult};
use crate::core::version::VersionString;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Syntax family of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ManifestFormat {
  /// `version = "x.y.z"` lines
  #[serde(rename = "key-value", alias = "key-value-line")]
  KeyValueLine,
  /// A whole JSON document with a top-level `"version"` field
  #[serde(rename = "json", alias = "structured-document")]
  StructuredDocument,
}

impl fmt::Display for ManifestFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestFormat::KeyValueLine => write!(f, "key-value"),
      ManifestFormat::StructuredDocument => write!(f, "json"),
    }
  }
}

/// One file to keep in version lockstep
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ManifestDescriptor {
  /// Path relative to the repository root
  pub path: PathBuf,
  pub format: ManifestFormat,
}

impl ManifestDescriptor {
  pub fn key_value(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      format: ManifestFormat::KeyValueLine,
    }
  }

  pub fn json(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      format: ManifestFormat::StructuredDocument,
    }
  }

  /// Absolute location of this manifest under `root`
  pub fn resolve(&self, root: &Path) -> PathBuf {
    root.join(&self.path)
  }
}

/// Read the current version of a manifest
pub fn read_version(root: &Path, descriptor: &ManifestDescriptor) -> SyncResult<VersionString> {
  let path = descriptor.resolve(root);
  ensure_exists(&path)?;

  match descriptor.format {
    ManifestFormat::KeyValueLine => key_value::read_version(&path),
    ManifestFormat::StructuredDocument => document::read_version(&path),
  }
}

/// Rewrite the version field of a manifest, returning the version it replaced
///
/// Fails with `ManifestNotFound` before anything is written if the file is absent.
pub fn write_version(
  root: &Path,
  descriptor: &ManifestDescriptor,
  new_version: &VersionString,
) -> SyncResult<VersionString> {
  let path = descriptor.resolve(root);
  ensure_exists(&path)?;

  let previous = match descriptor.format {
    ManifestFormat::KeyValueLine => key_value::write_version(&path, new_version)?,
    ManifestFormat::StructuredDocument => document::write_version(&path, new_version)?,
  };

  tracing::info!(
    manifest = %descriptor.path.display(),
    from = %previous,
    to = %new_version,
    "set version"
  );

  Ok(previous)
}

fn ensure_exists(path: &Path) -> SyncResult<()> {
  if path.is_file() {
    Ok(())
  } else {
    Err(SyncError::ManifestNotFound {
      path: path.to_path_buf(),
    })
  }
}
