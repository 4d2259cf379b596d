//! Per-ecosystem membership, exclusion and annotation rules.

use crate::utils::extension_suffix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Marker used when a file has no ecosystem-specific comment syntax.
pub const DEFAULT_COMMENT_MARKER: &str = "//";

/// A language ecosystem the walker can be restricted to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// JavaScript / TypeScript projects
    Node,
    /// Go modules
    Go,
    /// Python packages
    Python,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ecosystem '{0}' (expected one of: node, go, python)")]
pub struct UnknownEcosystem(pub String);

impl Ecosystem {
    pub const ALL: [Ecosystem; 3] = [Ecosystem::Node, Ecosystem::Go, Ecosystem::Python];

    pub fn name(self) -> &'static str {
        match self {
            Ecosystem::Node => "node",
            Ecosystem::Go => "go",
            Ecosystem::Python => "python",
        }
    }

    /// Recognized file extensions, dot included.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Ecosystem::Node => &[".ts", ".js", ".jsx", ".mjs", ".cjs"],
            Ecosystem::Go => &[".go"],
            Ecosystem::Python => &[".py"],
        }
    }

    /// Manifest files that belong to the ecosystem but must never be commented.
    ///
    /// Their first line is read by external tooling (`go.mod` starts with the
    /// module directive, `go.sum` is a checksum database).
    pub fn protected_manifests(self) -> &'static [&'static str] {
        match self {
            Ecosystem::Go => &["go.mod", "go.sum"],
            Ecosystem::Node | Ecosystem::Python => &[],
        }
    }

    /// Directories (relative to the scan root) skipped while this ecosystem is active.
    pub fn excluded_dirs(self) -> &'static [&'static str] {
        match self {
            Ecosystem::Node => &["public", ".next"],
            Ecosystem::Go => &["vendor", ".git"],
            Ecosystem::Python => &["venv", ".venv", "__pycache__"],
        }
    }

    pub fn comment_marker(self) -> &'static str {
        match self {
            Ecosystem::Python => "#",
            Ecosystem::Node | Ecosystem::Go => DEFAULT_COMMENT_MARKER,
        }
    }

    /// True when the file's extension or exact name belongs to this ecosystem.
    pub fn is_member(self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let ext = extension_suffix(name);
        self.is_protected_manifest(name) || self.extensions().iter().any(|e| *e == ext)
    }

    /// True when `rel_path` equals or is nested under one of the excluded directories.
    ///
    /// `rel_path` must be root-relative and use `/` separators.
    pub fn is_excluded_path(self, rel_path: &str) -> bool {
        self.excluded_dirs().iter().any(|dir| {
            rel_path == *dir
                || rel_path.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/'))
        })
    }

    pub fn can_annotate(self, path: &Path) -> bool {
        if !self.is_member(path) {
            return false;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        !self.is_protected_manifest(name)
    }

    fn is_protected_manifest(self, file_name: &str) -> bool {
        self.protected_manifests().iter().any(|m| *m == file_name)
    }

    /// The ecosystem a file belongs to, independent of any active filter.
    pub fn detect(path: &Path) -> Option<Ecosystem> {
        Self::ALL.into_iter().find(|eco| eco.is_member(path))
    }

    /// Comment marker for an arbitrary file: the detected ecosystem's, or `//`.
    pub fn marker_for(path: &Path) -> &'static str {
        Self::detect(path).map_or(DEFAULT_COMMENT_MARKER, Ecosystem::comment_marker)
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ecosystem {
    type Err = UnknownEcosystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "node" | "nodejs" | "js" => Ok(Ecosystem::Node),
            "go" | "golang" => Ok(Ecosystem::Go),
            "python" | "py" => Ok(Ecosystem::Python),
            _ => Err(UnknownEcosystem(s.to_string())),
        }
    }
}
