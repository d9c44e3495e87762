//! CLI commands for versync
//!
//! - **show**: print every manifest's current version (no version argument given)
//! - **sync**: set a new version everywhere and print the remaining release steps

pub mod show;
pub mod sync;

pub use show::run_show;
pub use sync::run_sync;
