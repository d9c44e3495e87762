//! Tests for listing mode (no version argument)

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_listing_prints_versions_and_exits_nonzero() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;

  let output = run_versync(&repo.path, &[])?;
  assert_eq!(output.status.code(), Some(1));

  let out = stdout(&output);
  assert!(out.contains("Cargo.toml: 1.24.0"));
  assert!(out.contains("ffi/Cargo.toml: 1.24.0"));
  assert!(out.contains("package.json: 1.24.0"));
  assert!(stderr(&output).contains("need argument: new version, example: 1.25.0"));

  // Nothing is written in listing mode
  assert!(!repo.file_exists("release-date.in"));
  assert!(repo.staged_files()?.is_empty());

  Ok(())
}

#[test]
fn test_listing_reports_broken_manifest_inline() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;
  repo.write_file("package.json", "{ not json")?;

  let output = run_versync(&repo.path, &[])?;
  assert_eq!(output.status.code(), Some(1));

  let out = stdout(&output);
  assert!(out.contains("Cargo.toml: 1.24.0"));
  assert!(out.contains("package.json: ⚠️"));

  Ok(())
}

#[test]
fn test_listing_json() -> Result<()> {
  let repo = TestRepo::new("2.0.0")?;

  let output = run_versync(&repo.path, &["--json"])?;
  assert_eq!(output.status.code(), Some(1));

  let listing: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(listing["Cargo.toml"], "2.0.0");
  assert_eq!(listing["python/pyproject.toml"], "2.0.0");

  Ok(())
}
