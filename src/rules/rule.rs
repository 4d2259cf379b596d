//! A single compiled ignore pattern.

use globset::{GlobBuilder, GlobMatcher};

#[derive(Debug, Clone)]
pub struct IgnoreRule {
    raw: String,
    pattern: String,
    root_anchored: bool,
    dir_only: bool,
    matcher: Option<GlobMatcher>,
}

impl IgnoreRule {
    /// Parse one line of an ignore file.
    ///
    /// Returns `None` for blank lines, comments and patterns that are empty once
    /// their anchoring and directory slashes are removed.
    pub fn parse(line: &str) -> Option<Self> {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') {
            return None;
        }

        let (root_anchored, rest) = match raw.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (dir_only, pattern) = match rest.strip_suffix('/') {
            Some(pattern) => (true, pattern),
            None => (false, rest),
        };
        if pattern.is_empty() {
            return None;
        }

        let glob_text =
            if root_anchored { pattern.to_string() } else { format!("**/{}", pattern) };
        let matcher = match GlobBuilder::new(&glob_text).literal_separator(true).build() {
            Ok(glob) => Some(glob.compile_matcher()),
            Err(e) => {
                // Invalid globs never match; they must not widen what is ignored.
                tracing::warn!("Ignoring invalid pattern '{}': {}", raw, e);
                None
            }
        };

        Some(Self {
            raw: raw.to_string(),
            pattern: pattern.to_string(),
            root_anchored,
            dir_only,
            matcher,
        })
    }

    /// The line as written in the ignore file, trimmed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The glob without its anchoring or directory slash.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_root_anchored(&self) -> bool {
        self.root_anchored
    }

    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    pub fn is_valid(&self) -> bool {
        self.matcher.is_some()
    }

    /// Match a root-relative, slash-separated path.
    ///
    /// A rule that matches any ancestor directory of `rel_path` matches the path
    /// itself, so pruning a directory and asking about its contents agree.
    pub fn is_match(&self, rel_path: &str, is_dir: bool) -> bool {
        let Some(matcher) = &self.matcher else {
            return false;
        };

        for (idx, _) in rel_path.match_indices('/') {
            if matcher.is_match(&rel_path[..idx]) {
                return true;
            }
        }

        if self.dir_only && !is_dir {
            return false;
        }
        matcher.is_match(rel_path)
    }
}
