//! Counters reported at the end of a run.

use super::config::RunMode;
use super::outcome::{AnnotateOutcome, RelocateOutcome};
use crate::classify::Ecosystem;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    pub dirs_pruned: usize,
    pub files_ignored: usize,
    pub files_filtered: usize,
    pub files_yielded: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub mode: RunMode,
    pub ecosystem: Option<Ecosystem>,
    pub dry_run: bool,
    pub inserted: usize,
    pub would_insert: usize,
    pub already_present: usize,
    pub protected: usize,
    pub copied: usize,
    pub would_copy: usize,
    pub no_comment: usize,
    pub already_staged: usize,
    pub empty: usize,
    pub failed: usize,
    pub walk: WalkStats,
}

impl RunSummary {
    pub fn new(mode: RunMode, ecosystem: Option<Ecosystem>, dry_run: bool) -> Self {
        Self { mode, ecosystem, dry_run, ..Self::default() }
    }

    pub fn record_annotate(&mut self, outcome: &AnnotateOutcome) {
        match outcome {
            AnnotateOutcome::AlreadyPresent => self.already_present += 1,
            AnnotateOutcome::WouldInsert { .. } => self.would_insert += 1,
            AnnotateOutcome::Inserted { .. } => self.inserted += 1,
            AnnotateOutcome::Protected => self.protected += 1,
        }
    }

    pub fn record_relocate(&mut self, outcome: &RelocateOutcome) {
        match outcome {
            RelocateOutcome::Empty => self.empty += 1,
            RelocateOutcome::NoComment => self.no_comment += 1,
            RelocateOutcome::AlreadyStaged => self.already_staged += 1,
            RelocateOutcome::WouldCopy { .. } => self.would_copy += 1,
            RelocateOutcome::Copied { .. } => self.copied += 1,
        }
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visited = self.walk.files_yielded;
        match (self.mode, self.dry_run) {
            (RunMode::Annotate, true) => write!(
                f,
                "Done: {} would change, {} already present ({} files visited, {} failed)",
                self.would_insert, self.already_present, visited, self.failed
            ),
            (RunMode::Annotate, false) => write!(
                f,
                "Done: {} inserted, {} already present, {} protected ({} files visited, {} failed)",
                self.inserted, self.already_present, self.protected, visited, self.failed
            ),
            (RunMode::Relocate, dry_run) => write!(
                f,
                "Done: {} {}, {} without path comment, {} empty ({} files visited, {} failed)",
                if dry_run { self.would_copy } else { self.copied },
                if dry_run { "would be copied" } else { "copied" },
                self.no_comment,
                self.empty,
                visited,
                self.failed
            ),
        }
    }
}
