//! Staging of commented files under flat, hyphenated names.

use super::first_line::{comment_text, read_first_line};
use crate::domain::RelocateOutcome;
use crate::utils::{clean_path, extension_suffix};
use anyhow::{Context, Result};
use std::fs;
use std::path::{is_separator, Path, PathBuf};

/// Copies files whose first line names a path into `<root>/<staging dir>`.
pub struct Relocator {
    staging_dir: PathBuf,
}

impl Relocator {
    /// `staging_dir` is resolved against `root` when relative.
    pub fn new(root: &Path, staging_dir: &Path) -> Self {
        Self { staging_dir: clean_path(&root.join(staging_dir)) }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Create the staging directory and its parents. Existing directories are fine.
    pub fn ensure_staging_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.staging_dir).with_context(|| {
            format!("Failed creating staging directory {}", self.staging_dir.display())
        })
    }

    /// Copy `path` into the staging directory if its first line is a path comment.
    ///
    /// An existing file at the destination is overwritten.
    pub fn process_file(&self, path: &Path, dry_run: bool) -> Result<RelocateOutcome> {
        if self.is_staged(path) {
            tracing::debug!("Already in staging directory: {}", path.display());
            return Ok(RelocateOutcome::AlreadyStaged);
        }

        let first_line = match read_first_line(path) {
            Ok(Some(line)) => line,
            Ok(None) | Err(_) => {
                tracing::debug!("Empty file or error reading: {}", path.display());
                return Ok(RelocateOutcome::Empty);
            }
        };
        tracing::debug!("Processing file: {} (first line: {})", path.display(), first_line);

        let Some(comment_path) = comment_text(&first_line) else {
            tracing::debug!("No matching comment found in: {}", path.display());
            return Ok(RelocateOutcome::NoComment);
        };

        let file_name = staged_file_name(comment_path, path)?;
        let destination = self.staging_dir.join(file_name);

        if dry_run {
            return Ok(RelocateOutcome::WouldCopy { destination });
        }

        self.ensure_staging_dir()?;
        if same_file(path, &destination) {
            anyhow::bail!("Refusing to copy {} onto itself", path.display());
        }
        fs::copy(path, &destination).with_context(|| {
            format!("Failed copying {} to {}", path.display(), destination.display())
        })?;

        Ok(RelocateOutcome::Copied { destination })
    }

    fn is_staged(&self, path: &Path) -> bool {
        let Ok(staging) = fs::canonicalize(&self.staging_dir) else {
            return false;
        };
        fs::canonicalize(path).map(|real| real.starts_with(&staging)).unwrap_or(false)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Flat file name for a commented path: its own extension dropped, `/` turned
/// into `-`, and the source file's extension appended.
///
/// `app/widgets/button.tsx` on a `.tsx` source becomes `app-widgets-button.tsx`.
pub fn staged_file_name(comment_path: &str, source: &Path) -> Result<String> {
    let comment_path = comment_path.trim();
    let stem = &comment_path[..comment_path.len() - extension_suffix(comment_path).len()];
    let source_name = source.file_name().and_then(|n| n.to_str()).unwrap_or("");

    let name = format!("{}{}", stem.replace('/', "-"), extension_suffix(source_name));
    if name.is_empty() || name == "." || name == ".." || name.chars().any(is_separator) {
        anyhow::bail!(
            "Cannot derive a staging file name from comment '{}' in {}",
            comment_path,
            source.display()
        );
    }
    Ok(name)
}
