//! Structured JSON manifests (package.json)
//!
//! Output is deterministic: `serde_json::Value` keeps object keys in a BTreeMap, so
//! serialization sorts them, and `to_string_pretty` indents with two spaces. Numbers
//! keep their source text (`arbitrary_precision`), so only the version field changes. One
//! trailing newline is appended. Running twice with the same version therefore
//! produces identical bytes.

use super::atomic::write_atomic;
use crate::core::error::{ResultExt, SyncError, SyncResult};
use crate::core::version::VersionString;
use serde_json::Value;
use std::fs;
use std::path::Path;

const VERSION_FIELD: &str = "version";

fn parse(path: &Path) -> SyncResult<Value> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

  let doc: Value = serde_json::from_str(&content).map_err(|e| SyncError::MalformedManifest {
    path: path.to_path_buf(),
    reason: e.to_string(),
  })?;

  if !doc.is_object() {
    return Err(SyncError::MalformedManifest {
      path: path.to_path_buf(),
      reason: "top-level value is not an object".to_string(),
    });
  }

  Ok(doc)
}

fn version_of(doc: &Value) -> Option<&str> {
  doc.get(VERSION_FIELD).and_then(Value::as_str)
}

/// Render a document the way it is stored on disk
pub fn render(doc: &Value) -> SyncResult<String> {
  let mut out = serde_json::to_string_pretty(doc)?;
  out.push('\n');
  Ok(out)
}

pub fn read_version(path: &Path) -> SyncResult<VersionString> {
  let doc = parse(path)?;
  version_of(&doc)
    .map(VersionString::from_manifest)
    .ok_or_else(|| SyncError::VersionNotFound {
      path: path.to_path_buf(),
    })
}

pub fn write_version(path: &Path, new_version: &VersionString) -> SyncResult<VersionString> {
  let mut doc = parse(path)?;

  let previous = version_of(&doc)
    .map(VersionString::from_manifest)
    .ok_or_else(|| SyncError::VersionNotFound {
      path: path.to_path_buf(),
    })?;

  if let Some(obj) = doc.as_object_mut() {
    obj.insert(VERSION_FIELD.to_string(), Value::String(new_version.to_string()));
  }

  write_atomic(path, render(&doc)?.as_bytes())?;
  Ok(previous)
}
