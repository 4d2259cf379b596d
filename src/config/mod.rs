//! Configuration loading and merging
//!
//! Handles loading from an optional config file at the scan root and merging
//! CLI arguments over it (CLI > File > Defaults).

pub mod loader;
pub mod merge;

pub use loader::{load_config, load_config_with_source};
pub use merge::{merge_cli_with_config, select_ecosystem, CliOverrides, SelectionError};
