//! Tests for setting a new version

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_sync_rewrites_every_manifest_and_stages() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;
  repo.add_changelog_entry("1.25.0")?;

  let output = run_versync(&repo.path, &["1.25.0"])?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));

  let cargo = repo.read_file("Cargo.toml")?;
  assert!(cargo.contains("version = \"1.25.0\""));
  // Dependency version specs are not line-start matches
  assert!(cargo.contains("serde = { version = \"1.0\" }"));
  assert!(repo.read_file("ffi/Cargo.toml")?.contains("version = \"1.25.0\""));
  assert!(repo.read_file("python/pyproject.toml")?.contains("version = \"1.25.0\""));

  assert_eq!(
    repo.read_file("package.json")?,
    "{\n  \"dependencies\": {},\n  \"name\": \"core-js\",\n  \"version\": \"1.25.0\"\n}\n"
  );
  assert_eq!(repo.read_file("release-date.in")?, today());

  let staged = repo.staged_files()?;
  for path in ["Cargo.toml", "ffi/Cargo.toml", "python/pyproject.toml", "package.json"] {
    assert!(staged.contains(&path.to_string()), "{} not staged: {:?}", path, staged);
  }
  // `git add -u` leaves untracked files alone
  assert!(!staged.contains(&"release-date.in".to_string()));

  let out = stdout(&output);
  assert!(out.contains("Cargo.toml: set version=1.25.0"));
  assert!(out.contains("git tag -a v1.25.0"));
  assert!(out.contains("gh release create v1.25.0 -n ''"));
  assert!(out.contains("Merge release branch into `master`"));

  Ok(())
}

#[test]
fn test_sync_rejects_mismatched_primaries() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;
  repo.add_changelog_entry("1.25.0")?;
  repo.write_file("ffi/Cargo.toml", "[package]\nname = \"core-ffi\"\nversion = \"1.23.0\"\n")?;

  let output = run_versync(&repo.path, &["1.25.0"])?;
  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains("1.24.0"), "stderr: {}", err);
  assert!(err.contains("1.23.0"), "stderr: {}", err);

  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.24.0\""));
  assert!(repo.read_file("package.json")?.contains("\"version\": \"1.24.0\""));
  assert!(!repo.file_exists("release-date.in"));

  Ok(())
}

#[test]
fn test_sync_rejects_two_part_version() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;

  let output = run_versync(&repo.path, &["1.25"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("1.25"));
  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.24.0\""));
  assert!(!repo.file_exists("release-date.in"));

  Ok(())
}

#[test]
fn test_sync_requires_changelog_entry() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;

  let output = run_versync(&repo.path, &["1.25.0"])?;
  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains(&format!("## [1.25.0] - {}", today())), "stderr: {}", err);
  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.24.0\""));

  Ok(())
}

#[test]
fn test_alpha_release_skips_changelog() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;

  let output = run_versync(&repo.path, &["1.25.0-alpha.1"])?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.25.0-alpha.1\""));
  assert!(repo.read_file("package.json")?.contains("\"version\": \"1.25.0-alpha.1\""));

  Ok(())
}

#[test]
fn test_missing_manifest_aborts_before_writing() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;
  repo.add_changelog_entry("1.25.0")?;
  std::fs::remove_file(repo.path.join("python/pyproject.toml"))?;

  let output = run_versync(&repo.path, &["1.25.0"])?;
  assert!(!output.status.success());
  assert!(stderr(&output).contains("python/pyproject.toml"));
  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.24.0\""));

  Ok(())
}

#[test]
fn test_sync_json_report() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;
  repo.add_changelog_entry("1.25.0")?;

  let output = run_versync(&repo.path, &["--json", "--no-stage", "1.25.0"])?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));

  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["new_version"], "1.25.0");
  assert_eq!(report["date"], today());
  assert_eq!(report["phase"], "done");
  assert_eq!(report["old_versions"]["package.json"], "1.24.0");
  assert_eq!(report["written"].as_array().map(|w| w.len()), Some(5));

  let steps = report["post_actions"].as_array().cloned().unwrap_or_default();
  assert!(steps.iter().all(|s| s["status"] == "skipped"));
  assert!(repo.staged_files()?.is_empty());

  Ok(())
}

#[test]
fn test_failed_build_check_still_exits_zero() -> Result<()> {
  let repo = TestRepo::new("1.24.0")?;
  repo.add_changelog_entry("1.25.0")?;
  let config = repo.read_file("versync.toml")?.replace("build_check = []", "build_check = [\"false\"]");
  repo.write_file("versync.toml", &config)?;

  let output = run_versync(&repo.path, &["1.25.0"])?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(stderr(&output).contains("build-check"));
  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.25.0\""));

  Ok(())
}
