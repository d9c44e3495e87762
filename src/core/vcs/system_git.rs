//! System git backend
//!
//! Shells out to the `git` binary with an isolated environment. versync only needs
//! to locate the work tree and stage files, so that is all this exposes.

use crate::core::error::{GitError, ResultExt, SyncError, SyncResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git
pub struct SystemGit {
  /// Directory git commands run in
  repo_path: PathBuf,

  /// Working tree root
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open the git repository containing `path`
  pub fn open(path: &Path) -> SyncResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(SyncError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(SyncError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(stdout.trim()),
    })
  }

  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Stage every modified tracked file (`git add -u`)
  ///
  /// Untracked files are left alone, so a fresh release-date marker in a repo that
  /// never committed one stays untracked.
  pub fn stage_tracked(&self) -> SyncResult<()> {
    self.run(&["add", "-u"])
  }

  /// Paths with staged changes, relative to the work tree
  pub fn staged_paths(&self) -> SyncResult<Vec<PathBuf>> {
    let output = self
      .git_cmd()
      .args(["diff", "--cached", "--name-only"])
      .output()
      .context("Failed to list staged files")?;

    if !output.status.success() {
      return Err(SyncError::Git(GitError::CommandFailed {
        command: "git diff --cached --name-only".to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }

    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect(),
    )
  }

  fn run(&self, args: &[&str]) -> SyncResult<()> {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
      return Err(SyncError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }

    Ok(())
  }

  /// Create a git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
