//! Directory traversal with ignore-rule pruning

use crate::rules::IgnoreRuleSet;
use std::path::{Path, PathBuf};

pub mod walker;

pub use walker::{TreeWalker, Walk, WalkError};

/// Collect every in-scope file under `root`, stopping at the first traversal error.
pub fn collect_files(root: &Path, rules: &IgnoreRuleSet) -> Result<Vec<PathBuf>, WalkError> {
    TreeWalker::new(root, rules).walk().collect()
}
