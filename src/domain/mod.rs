//! Core data types shared across modules

pub mod config;
pub mod outcome;
pub mod summary;

pub use config::{Config, OutputFormat, RunMode, DEFAULT_IGNORE_FILE, DEFAULT_STAGING_DIR};
pub use outcome::{AnnotateOutcome, RelocateOutcome};
pub use summary::{RunSummary, WalkStats};
