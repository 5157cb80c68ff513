//! SQL comment stripping.
//!
//! Comments are removed before any other analysis so that keyword and
//! table scanning cannot be evaded by hiding tokens inside them.

use regex::Regex;
use std::sync::LazyLock;

/// Single-line comment: `--` to end of line
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--[^\n]*").unwrap());

/// Block comment: `/* ... */`, possibly spanning lines
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Remove single-line and block comments and trim the result.
pub fn strip(sql: &str) -> String {
    let without_line = LINE_COMMENT.replace_all(sql, "");
    let without_block = BLOCK_COMMENT.replace_all(&without_line, "");
    without_block.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_line_comment() {
        assert_eq!(strip("SELECT 1 -- trailing"), "SELECT 1");
    }

    #[test]
    fn test_strips_line_comment_per_line() {
        assert_eq!(
            strip("SELECT a -- one\nFROM items -- two"),
            "SELECT a \nFROM items"
        );
    }

    #[test]
    fn test_strips_block_comment() {
        assert_eq!(strip("SELECT /* hidden */ 1"), "SELECT  1");
    }

    #[test]
    fn test_strips_multiline_block_comment() {
        assert_eq!(strip("SELECT 1 /* a\nb\nc */"), "SELECT 1");
    }

    #[test]
    fn test_block_comment_is_non_greedy() {
        assert_eq!(strip("SELECT /* a */ 1 /* b */"), "SELECT  1");
    }

    #[test]
    fn test_trims_result() {
        assert_eq!(strip("  SELECT 1  "), "SELECT 1");
    }

    #[test]
    fn test_comment_only_input_becomes_empty() {
        assert_eq!(strip("-- nothing here"), "");
        assert_eq!(strip("/* nothing */"), "");
    }
}
