//! Tests for descriptor table discovery and CLI overrides

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_root_flag_runs_from_elsewhere() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;
  repo.add_changelog_entry("1.25.0")?;
  let elsewhere = tempfile::TempDir::new()?;
  let root = repo.path.to_string_lossy().into_owned();

  let output = run_versync(elsewhere.path(), &["-C", &root, "--no-stage", "1.25.0"])?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(repo.read_file("ffi/Cargo.toml")?.contains("version = \"1.25.0\""));
  assert!(repo.staged_files()?.is_empty());

  Ok(())
}

#[test]
fn test_explicit_config_must_exist() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;

  let output = run_versync(&repo.path, &["--config", "missing.toml", "1.25.0"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("missing.toml"));

  Ok(())
}

#[test]
fn test_config_from_dot_config_dir() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;
  let table = repo.read_file("versync.toml")?;
  std::fs::remove_file(repo.path.join("versync.toml"))?;
  repo.write_file(".config/versync.toml", &table)?;

  let output = run_versync(&repo.path, &[])?;
  let out = stdout(&output);
  assert!(out.contains("ffi/Cargo.toml: 1.24.0"), "stdout: {}", out);

  Ok(())
}

#[test]
fn test_invalid_table_is_rejected() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;
  repo.write_file(
    "versync.toml",
    "primary = [\"Cargo.toml\"]\n\n[[manifests]]\npath = \"Cargo.toml\"\nformat = \"key-value\"\n",
  )?;

  let output = run_versync(&repo.path, &["1.25.0"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("primary"));
  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.24.0\""));

  Ok(())
}
