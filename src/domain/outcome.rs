//! Per-file results of the two run modes.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotateOutcome {
    /// The first line already carries a path comment.
    AlreadyPresent,
    /// Dry run: the comment that would have been written.
    WouldInsert { relative_path: String },
    Inserted { relative_path: String },
    /// A protected manifest of the active ecosystem; left untouched.
    Protected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocateOutcome {
    /// Empty file, or its first line could not be read.
    Empty,
    /// The first line is not a path comment.
    NoComment,
    /// The source already lives in the staging directory.
    AlreadyStaged,
    WouldCopy { destination: PathBuf },
    Copied { destination: PathBuf },
}
