use crate::core::error::{ConfigError, ResultExt, SyncError, SyncResult};
use crate::manifest::ManifestDescriptor;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for versync
///
/// Searched in order: versync.toml, .versync.toml, .config/versync.toml. Without a
/// file the built-in table for the deltachat-core-rust layout is used.
///
/// # Example
///
/// ```toml
/// changelog = "CHANGELOG.md"
/// release_date_file = "release-date.in"
/// primary = ["Cargo.toml", "ffi/Cargo.toml"]
///
/// [post]
/// build_check = ["cargo", "check"]
/// stage = true
///
/// [[manifests]]
/// path = "Cargo.toml"
/// format = "key-value"
///
/// [[manifests]]
/// path = "package.json"
/// format = "json"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
  /// Changelog that must document every non-exempt release
  #[serde(default = "default_changelog")]
  pub changelog: PathBuf,

  /// One-line file holding the date of the last sync
  #[serde(default = "default_release_date_file")]
  pub release_date_file: PathBuf,

  /// Manifests whose versions must agree before a run (at least two)
  #[serde(default = "default_primary")]
  pub primary: Vec<PathBuf>,

  /// Versions containing any of these substrings skip the changelog check
  #[serde(default = "default_exempt_markers")]
  pub exempt_markers: Vec<String>,

  #[serde(default)]
  pub post: PostConfig,

  pub manifests: Vec<ManifestDescriptor>,
}

/// Best-effort steps that run after the manifests are written
#[derive(Debug, Clone, Deserialize)]
pub struct PostConfig {
  /// Build sanity check command; empty disables it
  #[serde(default = "default_build_check")]
  pub build_check: Vec<String>,

  /// Stage modified tracked files with git
  #[serde(default = "default_stage")]
  pub stage: bool,
}

impl Default for PostConfig {
  fn default() -> Self {
    Self {
      build_check: default_build_check(),
      stage: default_stage(),
    }
  }
}

fn default_changelog() -> PathBuf {
  PathBuf::from("CHANGELOG.md")
}

fn default_release_date_file() -> PathBuf {
  PathBuf::from("release-date.in")
}

fn default_primary() -> Vec<PathBuf> {
  vec![PathBuf::from("Cargo.toml"), PathBuf::from("deltachat-ffi/Cargo.toml")]
}

fn default_exempt_markers() -> Vec<String> {
  vec!["alpha".to_string()]
}

fn default_build_check() -> Vec<String> {
  vec!["cargo".to_string(), "check".to_string()]
}

fn default_stage() -> bool {
  true
}

impl Default for SyncConfig {
  fn default() -> Self {
    let key_value = [
      "Cargo.toml",
      "deltachat-ffi/Cargo.toml",
      "deltachat-jsonrpc/Cargo.toml",
      "deltachat-rpc-server/Cargo.toml",
      "deltachat-repl/Cargo.toml",
      "python/pyproject.toml",
      "deltachat-rpc-client/pyproject.toml",
    ];
    let json = [
      "package.json",
      "deltachat-jsonrpc/typescript/package.json",
      "deltachat-rpc-server/npm-package/package.json",
    ];

    let manifests = key_value
      .into_iter()
      .map(ManifestDescriptor::key_value)
      .chain(json.into_iter().map(ManifestDescriptor::json))
      .collect();

    Self {
      changelog: default_changelog(),
      release_date_file: default_release_date_file(),
      primary: default_primary(),
      exempt_markers: default_exempt_markers(),
      post: PostConfig::default(),
      manifests,
    }
  }
}

impl SyncConfig {
  /// Find config file in search order: versync.toml, .versync.toml, .config/versync.toml
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = vec![
      root.join("versync.toml"),
      root.join(".versync.toml"),
      root.join(".config").join("versync.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Resolve the descriptor table for `root`
  ///
  /// An explicit path must exist. Otherwise the search locations are tried, then the
  /// built-in table.
  pub fn resolve(root: &Path, explicit: Option<&Path>) -> SyncResult<Self> {
    if let Some(path) = explicit {
      let path = if path.is_absolute() {
        path.to_path_buf()
      } else {
        root.join(path)
      };
      if !path.exists() {
        return Err(SyncError::Config(ConfigError::NotFound { path }));
      }
      return Self::load(&path);
    }

    match Self::find_config_path(root) {
      Some(path) => Self::load(&path),
      None => {
        tracing::debug!("no versync.toml found, using built-in manifest table");
        Ok(Self::default())
      }
    }
  }

  /// Load and validate a config file
  pub fn load(config_path: &Path) -> SyncResult<Self> {
    tracing::debug!(path = %config_path.display(), "loading config");

    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: SyncConfig = toml_edit::de::from_str(&content)?;

    config.validate()?;
    Ok(config)
  }

  /// Check the table invariants
  pub fn validate(&self) -> SyncResult<()> {
    let invalid = |reason: String| Err(SyncError::Config(ConfigError::Invalid { reason }));

    if self.manifests.is_empty() {
      return invalid("at least one [[manifests]] entry is required".to_string());
    }

    let mut seen = HashSet::new();
    for manifest in &self.manifests {
      if manifest.path.as_os_str().is_empty() {
        return invalid("manifest path must not be empty".to_string());
      }
      if !seen.insert(&manifest.path) {
        return invalid(format!("manifest '{}' is listed twice", manifest.path.display()));
      }
    }

    if self.primary.len() < 2 {
      return invalid(format!(
        "`primary` needs at least two manifests to compare (found {})",
        self.primary.len()
      ));
    }
    for primary in &self.primary {
      if !seen.contains(primary) {
        return invalid(format!(
          "primary manifest '{}' is not in the manifest list",
          primary.display()
        ));
      }
    }

    Ok(())
  }

  /// Descriptors of the primary manifests, in `primary` order
  pub fn primary_descriptors(&self) -> Vec<&ManifestDescriptor> {
    self
      .primary
      .iter()
      .filter_map(|p| self.manifests.iter().find(|m| &m.path == p))
      .collect()
  }

  /// Manifests in rewrite order: key-value group first, then structured documents
  pub fn manifests_in_write_order(&self) -> Vec<&ManifestDescriptor> {
    let mut ordered: Vec<_> = self.manifests.iter().collect();
    ordered.sort_by_key(|m| m.format == crate::manifest::ManifestFormat::StructuredDocument);
    ordered
  }
}
