//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Descriptor table used by every fixture. No build check so tests stay fast.
const VERSYNC_TOML: &str = r#"changelog = "CHANGELOG.md"
release_date_file = "release-date.in"
primary = ["Cargo.toml", "ffi/Cargo.toml"]

[post]
build_check = []
stage = true

[[manifests]]
path = "Cargo.toml"
format = "key-value"

[[manifests]]
path = "ffi/Cargo.toml"
format = "key-value"

[[manifests]]
path = "python/pyproject.toml"
format = "key-value"

[[manifests]]
path = "package.json"
format = "json"
"#;

/// A release repository with git history and four manifests at one version
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Create a repository whose manifests all carry `version`
  pub fn new(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    let repo = Self { _root: root, path };
    repo.write_file("versync.toml", VERSYNC_TOML)?;
    repo.write_file(
      "Cargo.toml",
      &format!(
        "[package]\nname = \"core\"\nversion = \"{}\"\nedition = \"2021\"\n\n[dependencies]\nserde = {{ version = \"1.0\" }}\n",
        version
      ),
    )?;
    repo.write_file(
      "ffi/Cargo.toml",
      &format!("[package]\nname = \"core-ffi\"\nversion = \"{}\"\n", version),
    )?;
    repo.write_file(
      "python/pyproject.toml",
      &format!("[project]\nname = \"core-py\"\nversion = \"{}\"\n", version),
    )?;
    repo.write_file(
      "package.json",
      &format!(
        "{{\n    \"name\": \"core-js\",\n    \"version\": \"{}\",\n    \"dependencies\": {{}}\n}}\n",
        version
      ),
    )?;
    repo.write_file("CHANGELOG.md", "# Changelog\n\n## Unreleased\n")?;

    git(&repo.path, &["add", "."])?;
    git(&repo.path, &["commit", "-m", "Initial release layout"])?;

    Ok(repo)
  }

  /// Add a changelog heading for `version` dated today
  pub fn add_changelog_entry(&self, version: &str) -> Result<()> {
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d");
    let content = format!("# Changelog\n\n## [{}] - {}\n\n- Release notes\n", version, today);
    self.write_file("CHANGELOG.md", &content)?;
    git(&self.path, &["commit", "-am", "Add changelog entry"])?;
    Ok(())
  }

  /// Write a file relative to the repo root, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Paths currently in the git index that differ from HEAD
  pub fn staged_files(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["diff", "--cached", "--name-only"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }
}

/// Today's date as written to the release-date marker
pub fn today() -> String {
  chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the versync binary. Does not assert success; callers check the exit code.
pub fn run_versync(cwd: &Path, args: &[&str]) -> Result<Output> {
  let versync_bin = env!("CARGO_BIN_EXE_versync");

  Command::new(versync_bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run versync")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
