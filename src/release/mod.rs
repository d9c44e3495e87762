//! Release bookkeeping outside the manifests
//!
//! - **changelog**: the documented-before-released gate
//! - **marker**: the `release-date.in` file rewritten on every sync

pub mod changelog;
pub mod marker;

pub use changelog::{ChangelogCheck, ChangelogValidator};
pub use marker::write_release_date;
