//! Resolved run configuration.

use crate::classify::Ecosystem;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";
pub const DEFAULT_STAGING_DIR: &str = ".bb";

/// What happens to each in-scope file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Prepend a path comment to files that lack one.
    #[default]
    Annotate,
    /// Copy files carrying a path comment into the staging directory.
    Relocate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Restrict the walk to a single ecosystem.
    pub ecosystem: Option<Ecosystem>,
    /// Ignore file, relative to the scan root.
    pub ignore_file: PathBuf,
    /// Staging directory for relocate mode, relative to the scan root.
    pub staging_dir: PathBuf,
    /// Patterns applied in addition to the ignore file.
    #[serde(deserialize_with = "deserialize_patterns")]
    pub extra_ignore: Vec<String>,
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ecosystem: None,
            ignore_file: PathBuf::from(DEFAULT_IGNORE_FILE),
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            extra_ignore: Vec::new(),
            follow_symlinks: false,
        }
    }
}

/// Accept either a list of patterns or a single comma-separated string.
fn deserialize_patterns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Patterns {
        One(String),
        Many(Vec<String>),
    }

    let parts = match Patterns::deserialize(deserializer)? {
        Patterns::One(s) => s.split(',').map(str::to_string).collect::<Vec<_>>(),
        Patterns::Many(list) => list,
    };
    Ok(parts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()).map(str::to_string).collect())
}
