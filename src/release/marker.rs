//! Release-date marker file (`release-date.in`)

use crate::core::error::SyncResult;
use crate::manifest::atomic::write_atomic;
use chrono::NaiveDate;
use std::path::Path;

/// Overwrite the marker with `date` in ISO 8601 form, without a trailing newline
pub fn write_release_date(path: &Path, date: NaiveDate) -> SyncResult<()> {
  let iso = date.format("%Y-%m-%d").to_string();
  write_atomic(path, iso.as_bytes())?;
  tracing::info!(path = %path.display(), date = %iso, "wrote release date");
  Ok(())
}
