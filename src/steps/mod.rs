//! Best-effort post-actions
//!
//! Once every manifest is rewritten, versync runs a build sanity check and stages the
//! result for commit. Neither can undo or invalidate the rewrite, so both report a
//! [`StepOutcome`] instead of an error.
//!
//! # Built-in Steps
//!
//! - **build-check**: runs the configured command (default `cargo check`)
//! - **stage**: `git add -u` in the repository

mod build_check;
mod runner;
mod stage;
mod trait_def;

pub use runner::{StepRunner, create_default_runner};
pub use trait_def::{PostAction, StepContext, StepOutcome, StepStatus};
