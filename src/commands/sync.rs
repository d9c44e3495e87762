//! Sync command: set a new version across all manifests

use crate::core::coordinator::{SyncReport, VersionCoordinator};
use crate::core::error::SyncResult;
use crate::steps::StepStatus;

/// Run the sync pipeline for `new_version` and print the outcome
pub fn run_sync(coordinator: &VersionCoordinator, new_version: &str, json: bool) -> SyncResult<()> {
  let report = coordinator.run(new_version)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  print_report(coordinator, &report);
  print_guidance(&report.new_version.to_string());
  Ok(())
}

fn print_report(coordinator: &VersionCoordinator, report: &SyncReport) {
  for warning in &report.warnings {
    eprintln!("⚠️  {}", warning);
  }
  if report.changelog_exempt {
    println!("ℹ️  {} is a pre-release, changelog check skipped", report.new_version);
  }

  let marker = &coordinator.config().release_date_file;
  for path in &report.written {
    if path == marker {
      println!("{}: set release date={}", path.display(), report.date);
    } else {
      println!("{}: set version={}", path.display(), report.new_version);
    }
  }

  println!();
  for outcome in &report.post_actions {
    let icon = match outcome.status {
      StepStatus::Succeeded => "✅",
      StepStatus::Failed => "⚠️ ",
      StepStatus::Skipped => "⏭️ ",
    };
    println!("{} {}: {}", icon, outcome.step_name, outcome.message);
  }
  if !report.post_actions_clean() {
    println!();
    println!("Manifests are updated; finish the failed steps above by hand.");
  }
  println!();
}

/// Manual steps left after a sync
pub fn release_guidance(version: &str) -> Vec<String> {
  vec![
    format!("git tag -a v{}", version),
    format!("git push origin v{}", version),
    format!("gh release create v{} -n ''", version),
  ]
}

fn print_guidance(version: &str) {
  println!("After commit, make sure to:");
  println!();
  for step in release_guidance(version) {
    println!("   {}", step);
  }
  println!();
  println!("Merge release branch into `master` if the release");
  println!("is made on a stable branch.");
  println!();
}
