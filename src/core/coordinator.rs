//! Version synchronization pipeline
//!
//! A run moves through `Start -> Validated -> Written -> Staged -> Done`.
//!
//! Everything that can reject a release happens before `Validated`: the version
//! format, agreement of the primary manifests, the changelog entry, and a preflight
//! read of every manifest. After that only I/O errors can stop the rewrite, and there
//! is no rollback. If one happens mid-rewrite, some manifests already carry the new
//! version and the repository needs manual inspection.
//!
//! Only the primary manifests are compared. The rest are read during preflight, so
//! missing or malformed files are caught early, but a non-primary manifest that has
//! drifted is silently brought back in line.

use crate::core::config::SyncConfig;
use crate::core::error::{SyncError, SyncResult};
use crate::core::version::VersionString;
use crate::manifest::{self, ManifestDescriptor};
use crate::release::{ChangelogCheck, ChangelogValidator, write_release_date};
use crate::steps::{StepContext, StepOutcome, StepRunner, create_default_runner};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
  Start,
  Validated,
  Written,
  Staged,
  Done,
}

impl Phase {
  fn next(self) -> Option<Phase> {
    match self {
      Phase::Start => Some(Phase::Validated),
      Phase::Validated => Some(Phase::Written),
      Phase::Written => Some(Phase::Staged),
      Phase::Staged => Some(Phase::Done),
      Phase::Done => None,
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Phase::Start => "start",
      Phase::Validated => "validated",
      Phase::Written => "written",
      Phase::Staged => "staged",
      Phase::Done => "done",
    };
    f.write_str(name)
  }
}

/// Per-run state. Built fresh on every invocation and dropped at the end.
#[derive(Debug, Clone)]
pub struct ReleaseState {
  /// Version found in each manifest before the rewrite
  pub old_versions: BTreeMap<PathBuf, VersionString>,
  pub new_version: VersionString,
  pub today: NaiveDate,
  pub changelog: Option<ChangelogCheck>,
  /// Advisory notes that never block a run
  pub warnings: Vec<String>,
  phase: Phase,
}

impl ReleaseState {
  fn new(new_version: VersionString, today: NaiveDate) -> Self {
    Self {
      old_versions: BTreeMap::new(),
      new_version,
      today,
      changelog: None,
      warnings: Vec::new(),
      phase: Phase::Start,
    }
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  /// Move to `to`; only the single forward step is allowed
  fn advance(&mut self, to: Phase) -> SyncResult<()> {
    if self.phase.next() != Some(to) {
      return Err(SyncError::message(format!(
        "internal error: cannot move from {} to {}",
        self.phase, to
      )));
    }
    tracing::debug!(from = %self.phase, to = %to, "phase transition");
    self.phase = to;
    Ok(())
  }
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
  pub new_version: VersionString,
  pub date: String,
  pub old_versions: BTreeMap<PathBuf, VersionString>,
  /// Files rewritten, relative to the repository root, in write order
  pub written: Vec<PathBuf>,
  pub changelog_exempt: bool,
  pub post_actions: Vec<StepOutcome>,
  pub warnings: Vec<String>,
  pub phase: Phase,
}

impl SyncReport {
  /// True when every post-action either succeeded or was skipped
  pub fn post_actions_clean(&self) -> bool {
    !self.post_actions.iter().any(StepOutcome::is_failure)
  }
}

/// Orchestrates one version sync over a descriptor table
pub struct VersionCoordinator {
  root: PathBuf,
  config: SyncConfig,
  today: NaiveDate,
  runner: StepRunner,
}

impl VersionCoordinator {
  /// Coordinator for `root` using today's local date and the configured post-actions
  pub fn new(root: &Path, config: SyncConfig) -> Self {
    let runner = create_default_runner(&config.post);
    Self {
      root: root.to_path_buf(),
      config,
      today: chrono::Local::now().date_naive(),
      runner,
    }
  }

  /// Pin the release date
  #[allow(dead_code)] // Used by tests for a deterministic date
  pub fn with_today(mut self, today: NaiveDate) -> Self {
    self.today = today;
    self
  }

  /// Replace the post-action runner
  #[allow(dead_code)] // Used by tests to inject post-actions
  pub fn with_runner(mut self, runner: StepRunner) -> Self {
    self.runner = runner;
    self
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn config(&self) -> &SyncConfig {
    &self.config
  }

  /// Read every manifest's current version without stopping at failures
  pub fn current_versions(&self) -> Vec<(&ManifestDescriptor, SyncResult<VersionString>)> {
    self
      .config
      .manifests
      .iter()
      .map(|m| (m, manifest::read_version(&self.root, m)))
      .collect()
  }

  /// Run every gate for `requested`. Nothing on disk is modified.
  pub fn validate(&self, requested: &str) -> SyncResult<ReleaseState> {
    let new_version = VersionString::parse(requested)?;
    let mut state = ReleaseState::new(new_version, self.today);

    let current = self.check_primaries()?;
    tracing::info!(current = %current, new = %state.new_version, "primary manifests agree");

    if let (Some(old), Some(new)) = (current.as_semver(), state.new_version.as_semver())
      && new < old
    {
      state
        .warnings
        .push(format!("{} sorts below the current version {}", state.new_version, current));
    }
    if current == state.new_version {
      state
        .warnings
        .push(format!("manifests already carry {}", state.new_version));
    }

    let validator = ChangelogValidator::new(self.root.join(&self.config.changelog), self.config.exempt_markers.clone());
    tracing::debug!(changelog = %validator.path().display(), "checking changelog");
    state.changelog = Some(validator.validate(&state.new_version, state.today)?);

    for descriptor in &self.config.manifests {
      let version = manifest::read_version(&self.root, descriptor)?;
      state.old_versions.insert(descriptor.path.clone(), version);
    }

    state.advance(Phase::Validated)?;
    Ok(state)
  }

  /// The primaries must agree; returns their shared version
  fn check_primaries(&self) -> SyncResult<VersionString> {
    let primaries = self.config.primary_descriptors();
    let Some((first, rest)) = primaries.split_first() else {
      return Err(SyncError::message("no primary manifests configured"));
    };

    let first_version = manifest::read_version(&self.root, first)?;
    for other in rest {
      let version = manifest::read_version(&self.root, other)?;
      if version != first_version {
        return Err(SyncError::VersionMismatch {
          first: (first.path.clone(), first_version.to_string()),
          second: (other.path.clone(), version.to_string()),
        });
      }
    }

    Ok(first_version)
  }

  /// Rewrite every manifest and the release-date marker
  ///
  /// Returns the rewritten paths relative to the root.
  pub fn write(&self, state: &mut ReleaseState) -> SyncResult<Vec<PathBuf>> {
    if state.phase() != Phase::Validated {
      return Err(SyncError::message(format!(
        "internal error: write requested in phase {}",
        state.phase()
      )));
    }

    let mut written = Vec::with_capacity(self.config.manifests.len() + 1);

    for descriptor in self.config.manifests_in_write_order() {
      let previous = manifest::write_version(&self.root, descriptor, &state.new_version)?;
      if state.old_versions.get(&descriptor.path) != Some(&previous) {
        tracing::warn!(
          manifest = %descriptor.path.display(),
          "version changed on disk between preflight and rewrite"
        );
      }
      written.push(descriptor.path.clone());
    }

    write_release_date(&self.root.join(&self.config.release_date_file), state.today)?;
    written.push(self.config.release_date_file.clone());

    state.advance(Phase::Written)?;
    Ok(written)
  }

  /// Full pipeline: validate, rewrite, post-actions
  pub fn run(&self, requested: &str) -> SyncResult<SyncReport> {
    let mut state = self.validate(requested)?;
    let written = self.write(&mut state)?;

    tracing::debug!(steps = ?self.runner.step_names(), "running post-actions");
    let post_actions = self.runner.run_all(&StepContext::new(&self.root));
    state.advance(Phase::Staged)?;
    state.advance(Phase::Done)?;

    Ok(SyncReport {
      new_version: state.new_version,
      date: state.today.format("%Y-%m-%d").to_string(),
      old_versions: state.old_versions,
      written,
      changelog_exempt: state.changelog == Some(ChangelogCheck::Exempt),
      post_actions,
      warnings: state.warnings,
      phase: state.phase,
    })
  }
}
