//! Shared utility functions

pub mod paths;

pub use paths::{clean_path, extension_suffix, normalize_path, relative_slash_path};
