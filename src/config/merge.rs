//! CLI-over-file configuration merging

use crate::classify::Ecosystem;
use crate::domain::Config;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("only one ecosystem filter may be active, got: {}", .0.join(", "))]
    Multiple(Vec<String>),
}

/// Values given on the command line; `None` / empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub ecosystem: Option<Ecosystem>,
    pub ignore_file: Option<PathBuf>,
    pub staging_dir: Option<PathBuf>,
    pub extra_ignore: Vec<String>,
    pub follow_symlinks: bool,
}

/// Reduce the selector flags to at most one ecosystem.
///
/// Repeating the same ecosystem through different flags is accepted; two
/// different ecosystems are an error.
pub fn select_ecosystem<I>(requested: I) -> Result<Option<Ecosystem>, SelectionError>
where
    I: IntoIterator<Item = Ecosystem>,
{
    let mut selected: Vec<Ecosystem> = Vec::new();
    for eco in requested {
        if !selected.contains(&eco) {
            selected.push(eco);
        }
    }
    match selected.as_slice() {
        [] => Ok(None),
        [one] => Ok(Some(*one)),
        many => Err(SelectionError::Multiple(many.iter().map(|e| e.to_string()).collect())),
    }
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(eco) = cli.ecosystem {
        config.ecosystem = Some(eco);
    }
    if let Some(ignore_file) = cli.ignore_file {
        config.ignore_file = ignore_file;
    }
    if let Some(staging_dir) = cli.staging_dir {
        config.staging_dir = staging_dir;
    }
    config.extra_ignore.extend(cli.extra_ignore);
    config.follow_symlinks |= cli.follow_symlinks;
    config
}
