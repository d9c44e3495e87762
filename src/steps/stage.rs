//! Stage modified tracked files for the release commit

use super::trait_def::{PostAction, StepContext, StepOutcome};
use crate::core::vcs::SystemGit;

pub struct StageChanges {
  enabled: bool,
}

impl StageChanges {
  pub fn new(enabled: bool) -> Self {
    Self { enabled }
  }
}

impl PostAction for StageChanges {
  fn name(&self) -> &str {
    "stage"
  }

  fn description(&self) -> &str {
    "adding changes to git index"
  }

  fn enabled(&self) -> bool {
    self.enabled
  }

  fn run(&self, ctx: &StepContext) -> StepOutcome {
    let repo = match SystemGit::open(&ctx.root) {
      Ok(repo) => repo,
      Err(e) => return StepOutcome::failed(self.name(), e.to_string(), None),
    };
    tracing::debug!(work_tree = %repo.work_tree().display(), "staging tracked changes");

    match repo.stage_tracked() {
      Ok(()) => {
        let staged = repo.staged_paths().map(|p| p.len()).unwrap_or(0);
        StepOutcome::succeeded(self.name(), format!("{} file(s) staged", staged))
      }
      Err(e) => StepOutcome::failed(self.name(), e.to_string(), None),
    }
  }
}
