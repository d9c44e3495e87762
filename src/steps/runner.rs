//! Runner for post-actions

use super::build_check::BuildCheck;
use super::stage::StageChanges;
use super::trait_def::{PostAction, StepContext, StepOutcome};
use crate::core::config::PostConfig;
use std::sync::Arc;

/// Ordered list of post-actions
pub struct StepRunner {
  steps: Vec<Arc<dyn PostAction>>,
}

impl StepRunner {
  /// Create an empty runner
  pub fn new() -> Self {
    Self { steps: Vec::new() }
  }

  /// Append a step; steps run in insertion order
  pub fn add_step(&mut self, step: Arc<dyn PostAction>) {
    self.steps.push(step);
  }

  /// Run every step, collecting outcomes. Never short-circuits.
  pub fn run_all(&self, ctx: &StepContext) -> Vec<StepOutcome> {
    let mut outcomes = Vec::with_capacity(self.steps.len());

    for step in &self.steps {
      if !step.enabled() {
        outcomes.push(StepOutcome::skipped(step.name(), "disabled"));
        continue;
      }

      eprintln!("🔧 {}", step.description());
      let outcome = step.run(ctx);

      if outcome.is_failure() {
        eprintln!("⚠️  {}: {}", step.name(), outcome.message);
        tracing::warn!(step = step.name(), message = %outcome.message, "post-action failed");
      } else {
        tracing::debug!(step = step.name(), status = %outcome.status, "post-action finished");
      }

      outcomes.push(outcome);
    }

    outcomes
  }

  /// Names of the registered steps, in run order
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name()).collect()
  }
}

impl Default for StepRunner {
  fn default() -> Self {
    Self::new()
  }
}

/// Create a runner with the built-in steps: build check, then staging
///
/// Staging runs after the build check so lockfile updates made by the check are staged
/// with the manifests. Steps turned off in `config` are reported as skipped.
pub fn create_default_runner(config: &PostConfig) -> StepRunner {
  let mut runner = StepRunner::new();

  runner.add_step(Arc::new(BuildCheck::from_command(&config.build_check)));
  runner.add_step(Arc::new(StageChanges::new(config.stage)));

  runner
}
