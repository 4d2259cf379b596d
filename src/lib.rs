//! bigbrain: stamp source files with their repository-relative path
//!
//! Walks a directory tree, skipping anything matched by a small gitignore
//! dialect, hidden entries and ecosystem-specific build or vendor folders.
//! Each remaining file either gets a `// <relative path>` comment as its first
//! line, or, in relocate mode, is copied into a flat staging folder under a
//! name derived from the path comment it already carries.

pub mod annotate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod domain;
pub mod rules;
pub mod scan;
pub mod utils;
