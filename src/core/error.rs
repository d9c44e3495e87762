//! Error types for versync with contextual messages and exit codes
//!
//! Every failure in a run is fatal. Validation errors (format, mismatch, changelog,
//! preflight reads) are raised before any manifest is touched; I/O errors raised while
//! rewriting propagate as-is and need manual inspection.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for versync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad argument, config, missing files)
  User = 1,
  /// System error (git, I/O)
  System = 2,
  /// Validation failure (mismatch, changelog)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for versync
#[derive(Debug)]
pub enum SyncError {
  /// A manifest has no recognizable version field
  VersionNotFound { path: PathBuf },

  /// A structured manifest failed to parse
  MalformedManifest { path: PathBuf, reason: String },

  /// A configured manifest does not exist
  ManifestNotFound { path: PathBuf },

  /// The changelog lacks `## [<version>] - <date>`
  MissingChangelogEntry {
    changelog: PathBuf,
    version: String,
    date: String,
  },

  /// The primary manifests disagree about the current version
  VersionMismatch {
    first: (PathBuf, String),
    second: (PathBuf, String),
  },

  /// The requested version has fewer than two dots
  InvalidVersionFormat { version: String },

  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// I/O errors, with the operation that hit them
  Io {
    source: io::Error,
    context: Option<String>,
  },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl SyncError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    SyncError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      SyncError::Message { message, context, help } => SyncError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      SyncError::Io { source, context } => SyncError::Io {
        source,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      SyncError::VersionMismatch { .. } | SyncError::MissingChangelogEntry { .. } => ExitCode::Validation,
      SyncError::Git(_) | SyncError::Io { .. } => ExitCode::System,
      SyncError::VersionNotFound { .. }
      | SyncError::MalformedManifest { .. }
      | SyncError::ManifestNotFound { .. }
      | SyncError::InvalidVersionFormat { .. }
      | SyncError::Config(_)
      | SyncError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      SyncError::InvalidVersionFormat { .. } => {
        Some("Versions need at least two dots, for example 1.25.0 or 1.25.0-alpha1.".to_string())
      }
      SyncError::MissingChangelogEntry { version, date, changelog } => Some(format!(
        "Add a line `## [{}] - {}` to {} before releasing.",
        version,
        date,
        changelog.display()
      )),
      SyncError::VersionMismatch { .. } => {
        Some("Bring the primary manifests back in sync by hand, then run again.".to_string())
      }
      SyncError::ManifestNotFound { .. } => {
        Some("Check the manifest table in versync.toml, or run from the repository root.".to_string())
      }
      SyncError::Config(e) => e.help_message(),
      SyncError::Git(e) => e.help_message(),
      SyncError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for SyncError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SyncError::VersionNotFound { path } => write!(f, "No version found in {}", path.display()),
      SyncError::MalformedManifest { path, reason } => {
        write!(f, "Malformed manifest {}: {}", path.display(), reason)
      }
      SyncError::ManifestNotFound { path } => write!(f, "Manifest not found: {}", path.display()),
      SyncError::MissingChangelogEntry {
        changelog, version, ..
      } => write!(f, "{} contains no entry for version: {}", changelog.display(), version),
      SyncError::VersionMismatch { first, second } => write!(
        f,
        "Version mismatch: {} has {} but {} has {}",
        first.0.display(),
        first.1,
        second.0.display(),
        second.1
      ),
      SyncError::InvalidVersionFormat { version } => {
        write!(f, "Invalid version '{}': need at least two dots in version", version)
      }
      SyncError::Config(e) => write!(f, "{}", e),
      SyncError::Git(e) => write!(f, "{}", e),
      SyncError::Io { source, context } => {
        write!(f, "I/O error: {}", source)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
      SyncError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for SyncError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SyncError::Io { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for SyncError {
  fn from(err: io::Error) -> Self {
    SyncError::Io {
      source: err,
      context: None,
    }
  }
}

impl From<String> for SyncError {
  fn from(msg: String) -> Self {
    SyncError::message(msg)
  }
}

impl From<&str> for SyncError {
  fn from(msg: &str) -> Self {
    SyncError::message(msg)
  }
}

impl From<toml_edit::de::Error> for SyncError {
  fn from(err: toml_edit::de::Error) -> Self {
    SyncError::Config(ConfigError::Invalid {
      reason: format!("TOML deserialization error: {}", err),
    })
  }
}

impl From<serde_json::Error> for SyncError {
  fn from(err: serde_json::Error) -> Self {
    SyncError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// An explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// The config parsed but violates a table invariant
  Invalid { reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Omit --config to fall back to versync.toml discovery or the built-in table.".to_string())
      }
      ConfigError::Invalid { .. } => {
        Some("Each [[manifests]] entry needs a unique `path` and a `format` of \"key-value\" or \"json\".".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => write!(f, "Config file not found: {}", path.display()),
      ConfigError::Invalid { reason } => write!(f, "Invalid versync configuration: {}", reason),
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run versync inside a git checkout, or pass --no-stage for: {}",
        path.display()
      )),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Result type alias for versync
pub type SyncResult<T> = Result<T, SyncError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> SyncResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> SyncResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<SyncError>,
{
  fn context(self, ctx: impl Into<String>) -> SyncResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> SyncResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &SyncError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
