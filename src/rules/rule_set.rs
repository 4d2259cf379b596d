//! Ordered ignore rules plus the built-in hidden-entry and ecosystem exclusions.

use super::rule::IgnoreRule;
use crate::classify::Ecosystem;
use crate::utils::{clean_path, relative_slash_path};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not open ignore file {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("could not read ignore file {} (kept {loaded} rules): {source}", path.display())]
    Read { path: PathBuf, loaded: usize, source: io::Error },
}

/// Why a path was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Under one of the active ecosystem's excluded directories.
    Ecosystem(Ecosystem),
    /// The final segment starts with a dot.
    Hidden,
    /// Matched a user rule; holds the rule as written.
    Rule(String),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::Ecosystem(eco) => write!(f, "{} specific directory", eco),
            IgnoreReason::Hidden => f.write_str("hidden file/directory"),
            IgnoreReason::Rule(raw) => write!(f, "rule {}", raw),
        }
    }
}

/// Rules owned by a single walk. Read-only once loading has finished.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    rules: Vec<IgnoreRule>,
    ecosystem: Option<Ecosystem>,
}

impl IgnoreRuleSet {
    pub fn new(ecosystem: Option<Ecosystem>) -> Self {
        Self { rules: Vec::new(), ecosystem }
    }

    /// Build a rule set from in-memory lines, as if read from an ignore file.
    pub fn from_lines<'a, I>(lines: I, ecosystem: Option<Ecosystem>) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self::new(ecosystem);
        for line in lines {
            set.add_pattern(line);
        }
        set
    }

    /// Append one pattern line. Returns `false` if the line held no rule.
    pub fn add_pattern(&mut self, line: &str) -> bool {
        match IgnoreRule::parse(line) {
            Some(rule) => {
                self.rules.push(rule);
                true
            }
            None => false,
        }
    }

    /// Exclude one concrete entry under `root`, such as a staging folder or a
    /// config file. `path` may be relative to `root` or absolute.
    ///
    /// The root-relative path is anchored and glob-escaped, so it matches that
    /// entry only. Returns `false` when `path` is outside `root` or is `root`.
    pub fn add_root_path(&mut self, root: &Path, path: &Path, is_dir: bool) -> bool {
        let joined = clean_path(&root.join(path));
        let rel_path = relative_slash_path(root, &joined).or_else(|| {
            fs::canonicalize(&joined).ok().and_then(|real| relative_slash_path(root, &real))
        });
        let Some(rel_path) = rel_path.filter(|rel| rel != "." && !rel.is_empty()) else {
            tracing::debug!("Not excluding {}: outside {}", path.display(), root.display());
            return false;
        };

        let suffix = if is_dir { "/" } else { "" };
        self.add_pattern(&format!("/{}{}", globset::escape(&rel_path), suffix))
    }

    /// Append the rules of an ignore file and return how many were added.
    ///
    /// A missing file adds nothing and is not an error. On a read failure the
    /// rules parsed before the failure stay in the set.
    pub fn load(&mut self, path: &Path) -> Result<usize, LoadError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No ignore file at {}", path.display());
                return Ok(0);
            }
            Err(source) => return Err(LoadError::Open { path: path.to_path_buf(), source }),
        };

        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut loaded = 0usize;
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    if self.add_pattern(&String::from_utf8_lossy(&buf)) {
                        loaded += 1;
                    }
                }
                Err(source) => {
                    return Err(LoadError::Read { path: path.to_path_buf(), loaded, source });
                }
            }
        }

        tracing::debug!("Loaded {} ignore rules from {}", loaded, path.display());
        Ok(loaded)
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn ecosystem(&self) -> Option<Ecosystem> {
        self.ecosystem
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether `path` (absolute, under `root`) is out of scope.
    pub fn should_ignore(&self, root: &Path, path: &Path) -> bool {
        self.should_ignore_entry(root, path, path.is_dir())
    }

    /// Same as [`should_ignore`](Self::should_ignore) with the entry kind already known.
    pub fn should_ignore_entry(&self, root: &Path, path: &Path, is_dir: bool) -> bool {
        let Some(rel_path) = relative_slash_path(root, path) else {
            tracing::warn!(
                "Cannot compute path of {} relative to {}",
                path.display(),
                root.display()
            );
            return false;
        };
        match self.ignore_reason(&rel_path, is_dir) {
            Some(reason) => {
                tracing::debug!("Ignoring due to {}: {}", reason, rel_path);
                true
            }
            None => false,
        }
    }

    /// Evaluate a root-relative, slash-separated path. `"."` is the root.
    pub fn ignore_reason(&self, rel_path: &str, is_dir: bool) -> Option<IgnoreReason> {
        if rel_path == "." || rel_path.is_empty() {
            return None;
        }

        if let Some(eco) = self.ecosystem {
            if eco.is_excluded_path(rel_path) {
                return Some(IgnoreReason::Ecosystem(eco));
            }
        }

        let base = rel_path.rsplit('/').next().unwrap_or(rel_path);
        if base.starts_with('.') {
            return Some(IgnoreReason::Hidden);
        }

        self.rules
            .iter()
            .find(|rule| rule.is_match(rel_path, is_dir))
            .map(|rule| IgnoreReason::Rule(rule.raw().to_string()))
    }
}
