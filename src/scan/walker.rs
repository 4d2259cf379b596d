//! Depth-first, name-sorted tree walker.

use crate::domain::WalkStats;
use crate::rules::IgnoreRuleSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
#[error("failed to traverse {}: {source}", path.display())]
pub struct WalkError {
    pub path: PathBuf,
    #[source]
    pub source: walkdir::Error,
}

/// Walks a scan root, consulting the rule set to prune subtrees and the
/// rule set's ecosystem to filter individual files.
pub struct TreeWalker<'a> {
    root: PathBuf,
    rules: &'a IgnoreRuleSet,
    follow_symlinks: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: &Path, rules: &'a IgnoreRuleSet) -> Self {
        Self { root: root.to_path_buf(), rules, follow_symlinks: false }
    }

    /// Set whether to follow symbolic links
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Start a lazy traversal. Entries are visited in file-name order.
    pub fn walk(&self) -> Walk<'a> {
        let inner = WalkDir::new(&self.root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter();
        Walk { inner, root: self.root.clone(), rules: self.rules, stats: WalkStats::default() }
    }
}

/// Iterator over in-scope files. Yields an error and keeps no further state
/// when a directory cannot be read; callers decide whether to stop.
pub struct Walk<'a> {
    inner: walkdir::IntoIter,
    root: PathBuf,
    rules: &'a IgnoreRuleSet,
    stats: WalkStats,
}

impl Walk<'_> {
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<PathBuf, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
                    return Some(Err(WalkError { path, source }));
                }
            };

            let file_type = entry.file_type();
            let is_dir = file_type.is_dir();

            if self.rules.should_ignore_entry(&self.root, entry.path(), is_dir) {
                if is_dir {
                    self.inner.skip_current_dir();
                    self.stats.dirs_pruned += 1;
                } else {
                    self.stats.files_ignored += 1;
                }
                continue;
            }

            if is_dir {
                continue;
            }
            if !file_type.is_file() {
                tracing::debug!("Skipping non-regular file: {}", entry.path().display());
                continue;
            }

            if let Some(eco) = self.rules.ecosystem() {
                if !eco.is_member(entry.path()) {
                    tracing::debug!("Skipping non-{} file: {}", eco, entry.path().display());
                    self.stats.files_filtered += 1;
                    continue;
                }
            }

            self.stats.files_yielded += 1;
            return Some(Ok(entry.into_path()));
        }
    }
}
