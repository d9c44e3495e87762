//! Build sanity check (`cargo check` by default)

use super::trait_def::{PostAction, StepContext, StepOutcome};
use std::process::{Command, Stdio};

/// Runs an external command and records whether the build still resolves
pub struct BuildCheck {
  command: Vec<String>,
  description: String,
}

impl BuildCheck {
  /// Build from a command line such as `["cargo", "check"]`; empty disables the check
  pub fn from_command(command: &[String]) -> Self {
    Self {
      command: command.to_vec(),
      description: format!("running {}", command.join(" ")),
    }
  }
}

impl PostAction for BuildCheck {
  fn name(&self) -> &str {
    "build-check"
  }

  fn description(&self) -> &str {
    &self.description
  }

  fn enabled(&self) -> bool {
    !self.command.is_empty()
  }

  fn run(&self, ctx: &StepContext) -> StepOutcome {
    let Some((program, args)) = self.command.split_first() else {
      return StepOutcome::skipped(self.name(), "no build check configured");
    };

    // Child stdout is folded into stderr so `--json` output stays clean.
    let status = Command::new(program)
      .args(args)
      .current_dir(&ctx.root)
      .stdout(Stdio::from(std::io::stderr()))
      .status();

    match status {
      Ok(status) if status.success() => StepOutcome::succeeded(self.name(), format!("{} passed", program)),
      Ok(status) => StepOutcome::failed(self.name(), format!("{} exited with {}", program, status), status.code()),
      Err(e) => StepOutcome::failed(self.name(), format!("could not run {}: {}", program, e), None),
    }
  }
}
