//! Post-action abstraction for best-effort steps after the manifests are written
//!
//! A post-action never fails the run. Whatever happens (the tool is missing, it
//! exits non-zero, the directory is not a repository) is captured in a
//! [`StepOutcome`] so callers can report manifests as correct independently of
//! whether the external tool cooperated.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Context passed to every post-action
#[derive(Debug, Clone)]
pub struct StepContext {
  /// Repository root the run operates on
  pub root: PathBuf,
}

impl StepContext {
  pub fn new(root: &Path) -> Self {
    Self {
      root: root.to_path_buf(),
    }
  }
}

/// Result status of a post-action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
  /// The step ran and succeeded
  Succeeded,
  /// The step ran (or tried to) and failed
  Failed,
  /// The step was disabled
  Skipped,
}

impl fmt::Display for StepStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StepStatus::Succeeded => write!(f, "ok"),
      StepStatus::Failed => write!(f, "FAILED"),
      StepStatus::Skipped => write!(f, "skipped"),
    }
  }
}

/// Outcome of running a post-action
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
  /// Name of the step that ran
  pub step_name: String,
  pub status: StepStatus,
  /// Human-readable message
  pub message: String,
  /// Exit code of the external process, when one ran to completion
  #[serde(skip_serializing_if = "Option::is_none")]
  pub exit_code: Option<i32>,
}

impl StepOutcome {
  pub fn succeeded(step_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      step_name: step_name.into(),
      status: StepStatus::Succeeded,
      message: message.into(),
      exit_code: Some(0),
    }
  }

  pub fn failed(step_name: impl Into<String>, message: impl Into<String>, exit_code: Option<i32>) -> Self {
    Self {
      step_name: step_name.into(),
      status: StepStatus::Failed,
      message: message.into(),
      exit_code,
    }
  }

  pub fn skipped(step_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      step_name: step_name.into(),
      status: StepStatus::Skipped,
      message: message.into(),
      exit_code: None,
    }
  }

  pub fn is_failure(&self) -> bool {
    self.status == StepStatus::Failed
  }
}

/// A best-effort action run after a successful rewrite
pub trait PostAction: Send + Sync {
  /// Unique name of this step (e.g., "build-check")
  fn name(&self) -> &str;

  /// What the step does, shown before it runs
  fn description(&self) -> &str;

  /// Disabled steps are reported as skipped without running
  fn enabled(&self) -> bool {
    true
  }

  /// Run the step. Implementations report failures in the outcome instead of panicking.
  fn run(&self, ctx: &StepContext) -> StepOutcome;
}
