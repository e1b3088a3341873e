//! CLI argument parsing and post-parse resolution

pub mod args;
pub mod resolve;

// Re-exports
pub use args::Args;
pub use resolve::{resolve_levels, LevelSpec, LevelValue};
