//! Atomic file replacement: write a temp sibling, then rename it over the target

use crate::core::error::{ResultExt, SyncError, SyncResult};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `content` so readers see either the old or the new bytes
///
/// The temp file lives in the same directory as `path`, which keeps the final
/// rename on one filesystem.
pub fn write_atomic(path: &Path, content: &[u8]) -> SyncResult<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut tmp =
    NamedTempFile::new_in(dir).with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
  tmp
    .write_all(content)
    .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
  tmp
    .as_file()
    .sync_all()
    .with_context(|| format!("Failed to flush temp file for {}", path.display()))?;

  if let Ok(meta) = std::fs::metadata(path) {
    // Keep the original mode; NamedTempFile is created 0600.
    if let Err(e) = std::fs::set_permissions(tmp.path(), meta.permissions()) {
      tracing::warn!(path = %path.display(), error = %e, "could not keep file permissions");
    }
  }

  tmp
    .persist(path)
    .map_err(|e| SyncError::from(e.error))
    .with_context(|| format!("Failed to replace {}", path.display()))?;

  Ok(())
}
