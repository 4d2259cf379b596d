//! Language ecosystem classification
//!
//! Pure, I/O-free predicates that decide whether a path belongs to an
//! ecosystem, whether it sits under one of that ecosystem's conventional
//! exclusion directories, and whether a path comment may be written into it.

pub mod ecosystem;

pub use ecosystem::{Ecosystem, UnknownEcosystem};
