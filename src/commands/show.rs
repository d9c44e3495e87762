//! Listing mode: report current versions, change nothing, exit non-zero

use crate::core::coordinator::VersionCoordinator;
use crate::core::error::{SyncError, SyncResult};
use std::collections::BTreeMap;

/// Print each manifest's version, then fail with the usage hint
///
/// Unreadable manifests are listed with their error instead of aborting the listing.
pub fn run_show(coordinator: &VersionCoordinator, json: bool) -> SyncResult<()> {
  let versions = coordinator.current_versions();

  if json {
    let listing: BTreeMap<String, String> = versions
      .iter()
      .map(|(m, v)| {
        let shown = match v {
          Ok(version) => version.to_string(),
          Err(e) => format!("error: {}", e),
        };
        (m.path.display().to_string(), shown)
      })
      .collect();
    println!("{}", serde_json::to_string_pretty(&listing)?);
  } else {
    println!();
    for (manifest, version) in &versions {
      match version {
        Ok(version) => println!("{}: {}", manifest.path.display(), version),
        Err(e) => println!("{}: ⚠️  {}", manifest.path.display(), e),
      }
    }
    println!();
  }

  Err(SyncError::Message {
    message: "need argument: new version, example: 1.25.0".to_string(),
    context: None,
    help: Some(format!(
      "Run `versync <NEW_VERSION>` from {} to set it in every manifest.",
      coordinator.root().display()
    )),
  })
}
