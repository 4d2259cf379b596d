//! Path-comment insertion and staging
//!
//! [`Annotator`] prepends `<marker> <relative path>` to files that lack a path
//! comment. [`Relocator`] reads an existing path comment and copies the file
//! into a flat staging directory under a hyphenated name.

pub mod annotator;
pub mod first_line;
pub mod relocator;

pub use annotator::Annotator;
pub use relocator::{staged_file_name, Relocator};
