//! Ignore-rule loading and evaluation
//!
//! A deliberately small gitignore dialect: one glob per line, `#` comments,
//! a leading `/` anchors the pattern to the scan root, a trailing `/` limits
//! it to directories. No negation and no nested ignore files.

pub mod rule;
pub mod rule_set;

pub use rule::IgnoreRule;
pub use rule_set::{IgnoreReason, IgnoreRuleSet, LoadError};
