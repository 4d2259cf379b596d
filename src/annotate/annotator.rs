//! Path-comment insertion.

use super::first_line::{has_path_comment, read_first_line};
use crate::classify::Ecosystem;
use crate::domain::AnnotateOutcome;
use crate::utils::{normalize_path, relative_slash_path};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Stamps files with their path relative to the scan root.
pub struct Annotator {
    root: PathBuf,
    ecosystem: Option<Ecosystem>,
}

impl Annotator {
    pub fn new(root: &Path, ecosystem: Option<Ecosystem>) -> Self {
        Self { root: root.to_path_buf(), ecosystem }
    }

    /// Ensure `path` starts with a path comment.
    ///
    /// Only the first line is read unless a comment has to be inserted. With
    /// `dry_run` nothing is written.
    pub fn process_file(&self, path: &Path, dry_run: bool) -> Result<AnnotateOutcome> {
        let first_line = read_first_line(path)
            .with_context(|| format!("Failed reading {}", path.display()))?
            .unwrap_or_default();

        if has_path_comment(&first_line) {
            tracing::debug!("Path already present: {}", path.display());
            return Ok(AnnotateOutcome::AlreadyPresent);
        }

        let relative_path = self.relative_path(path);

        if dry_run {
            return Ok(AnnotateOutcome::WouldInsert { relative_path });
        }

        if let Some(eco) = self.ecosystem {
            if !eco.can_annotate(path) {
                tracing::debug!("Skipping comment insertion for {} file: {}", eco, path.display());
                return Ok(AnnotateOutcome::Protected);
            }
        }

        let marker = Ecosystem::marker_for(path);
        let content = fs::read(path).with_context(|| format!("Failed reading {}", path.display()))?;

        let mut updated = format!("{} {}\n", marker, relative_path).into_bytes();
        updated.extend_from_slice(&content);
        replace_contents(path, &updated)?;

        Ok(AnnotateOutcome::Inserted { relative_path })
    }

    fn relative_path(&self, path: &Path) -> String {
        let rel = relative_slash_path(&self.root, path)
            .unwrap_or_else(|| normalize_path(&path.to_string_lossy()));
        rel.trim_start_matches('/').to_string()
    }
}

/// Swap in new content through a sibling temp file and a rename.
///
/// The file keeps its permissions. Read-only files are refused, the same
/// as a direct write would be. A symlink is kept and its target rewritten.
fn replace_contents(path: &Path, contents: &[u8]) -> Result<()> {
    let target = fs::canonicalize(path)
        .with_context(|| format!("Failed resolving {}", path.display()))?;
    let path = target.as_path();
    let permissions = fs::metadata(path)
        .with_context(|| format!("Failed reading metadata of {}", path.display()))?
        .permissions();
    if permissions.readonly() {
        anyhow::bail!("Refusing to rewrite read-only file {}", path.display());
    }

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let mut tmp = tempfile::Builder::new()
        .prefix(".bigbrain-")
        .tempfile_in(dir)
        .with_context(|| format!("Failed creating temp file in {}", dir.display()))?;
    tmp.write_all(contents)
        .with_context(|| format!("Failed writing temp file for {}", path.display()))?;
    fs::set_permissions(tmp.path(), permissions)
        .with_context(|| format!("Failed copying permissions to {}", tmp.path().display()))?;
    tmp.persist(path).with_context(|| format!("Failed replacing {}", path.display()))?;
    Ok(())
}
