//! Core engine for versync
//!
//! - **config**: descriptor table (versync.toml or the built-in layout)
//! - **coordinator**: the validate / write / post-action pipeline and its state machine
//! - **error**: error types with contextual help messages and exit codes
//! - **vcs**: system git wrapper used for staging
//! - **version**: literal version tokens

pub mod config;
pub mod coordinator;
pub mod error;
pub mod vcs;
pub mod version;
