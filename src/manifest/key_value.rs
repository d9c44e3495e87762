//! Line-oriented `version = "..."` manifests (Cargo.toml, pyproject.toml)
//!
//! This is a textual patch, not a TOML round trip: only the first line that starts
//! with `version = "` is touched. Dependency tables further down the file may also
//! contain `version = ...` lines; those come after `[package]` / `[project]` in
//! practice and are never reached.

use super::atomic::write_atomic;
use crate::core::error::{ResultExt, SyncError, SyncResult};
use crate::core::version::VersionString;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static VERSION_LINE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"^version = "(\S+)""#).expect("version line pattern is valid"));

/// Version captured from a single line, if it is the version line
fn match_version(line: &str) -> Option<&str> {
  VERSION_LINE
    .captures(line)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str())
}

/// Find the first version line in `content`
pub fn find_version(content: &str) -> Option<&str> {
  content.lines().find_map(match_version)
}

/// Replace the first version line, keeping every other byte as-is
///
/// Returns the new content and the version that was replaced, or `None` if the
/// content has no version line.
pub fn replace_version(content: &str, new_version: &VersionString) -> Option<(String, String)> {
  let mut out = String::with_capacity(content.len() + 8);
  let mut previous = None;

  for line in content.split_inclusive('\n') {
    if previous.is_none() {
      let (body, ending) = split_line_ending(line);
      if let Some(old) = match_version(body) {
        previous = Some(old.to_string());
        out.push_str(&format!("version = \"{}\"", new_version));
        out.push_str(ending);
        continue;
      }
    }
    out.push_str(line);
  }

  previous.map(|p| (out, p))
}

fn split_line_ending(line: &str) -> (&str, &str) {
  if let Some(body) = line.strip_suffix("\r\n") {
    (body, "\r\n")
  } else if let Some(body) = line.strip_suffix('\n') {
    (body, "\n")
  } else {
    (line, "")
  }
}

pub fn read_version(path: &Path) -> SyncResult<VersionString> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

  find_version(&content)
    .map(VersionString::from_manifest)
    .ok_or_else(|| SyncError::VersionNotFound {
      path: path.to_path_buf(),
    })
}

pub fn write_version(path: &Path, new_version: &VersionString) -> SyncResult<VersionString> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

  let (updated, previous) = replace_version(&content, new_version).ok_or_else(|| SyncError::VersionNotFound {
    path: path.to_path_buf(),
  })?;

  if updated != content {
    write_atomic(path, updated.as_bytes())?;
  }

  Ok(VersionString::from_manifest(previous))
}
