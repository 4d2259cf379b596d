//! First-line inspection.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Longest first line we look at; the rest of an overlong line is not read.
const MAX_FIRST_LINE_BYTES: u64 = 64 * 1024;

/// A path comment as written by annotate mode: `//` or `#`, then a non-space.
static PATH_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(//|#)\s*\S+").expect("valid regex"));

/// Any comment relocate mode accepts; group 1 is the commented text.
static COMMENT_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?://|#|;)\s*(\S.*)$").expect("valid regex"));

/// Read the first line of a file without loading the rest.
///
/// The line terminator (`\n` or `\r\n`) is removed and invalid UTF-8 is
/// replaced. Returns `None` for an empty file.
pub fn read_first_line(path: &Path) -> io::Result<Option<String>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file).take(MAX_FIRST_LINE_BYTES);
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

pub fn has_path_comment(line: &str) -> bool {
    PATH_COMMENT.is_match(line)
}

/// The trimmed text of a `//`, `#` or `;` comment line.
pub fn comment_text(line: &str) -> Option<&str> {
    COMMENT_TEXT.captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str().trim())
}
