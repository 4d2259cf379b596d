//! Path normalization

use std::path::{Component, Path, PathBuf};

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Path of `path` relative to `root`, with `/` separators.
///
/// The root itself maps to `"."`. Returns `None` when `path` is not under `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = normalize_path(&rel.to_string_lossy());
    let rel = rel.trim_start_matches("./").trim_start_matches('/');
    if rel.is_empty() || rel == "." {
        Some(".".to_string())
    } else {
        Some(rel.to_string())
    }
}

/// Lexically resolve `.` and `..` components without touching the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir => out.push(Path::new("/")),
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
        }
    }
    out
}

/// Extension of the final segment of a slash path, including the leading dot.
///
/// Everything from the last `.` of the last segment counts, so `.env` yields
/// `.env` and `archive.tar.gz` yields `.gz`. Returns `""` when there is no dot.
pub fn extension_suffix(path: &str) -> &str {
    let segment_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[segment_start..].rfind('.') {
        Some(dot) => &path[segment_start + dot..],
        None => "",
    }
}
