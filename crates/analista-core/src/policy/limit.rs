//! Row-limit guard for validated statements.

use super::comments;
use regex::Regex;
use std::sync::LazyLock;

/// Standalone LIMIT token anywhere in the statement
static LIMIT_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").unwrap());

/// Append `LIMIT <default>` when the statement carries no LIMIT clause.
///
/// Idempotent. The detection is a whole-query textual search: a LIMIT
/// inside a subquery also suppresses the guard even though the outer
/// query stays unbounded. Known limitation, kept for parity with the
/// documented policy.
pub fn enforce(sql: &str, default_limit: u32) -> String {
    let clean = comments::strip(sql);
    let clean = clean.trim_end_matches(';');
    if LIMIT_TOKEN.is_match(clean) {
        clean.to_string()
    } else {
        format!("{clean}\nLIMIT {default_limit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_default_limit() {
        assert_eq!(
            enforce("SELECT * FROM items", 200),
            "SELECT * FROM items\nLIMIT 200"
        );
    }

    #[test]
    fn test_existing_limit_left_unchanged() {
        // Even when the existing bound is below the default cap
        assert_eq!(
            enforce("SELECT * FROM items LIMIT 50", 200),
            "SELECT * FROM items LIMIT 50"
        );
    }

    #[test]
    fn test_limit_detection_is_case_insensitive() {
        assert_eq!(
            enforce("SELECT * FROM items limit 5", 200),
            "SELECT * FROM items limit 5"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = enforce("SELECT * FROM items", 200);
        let twice = enforce(&once, 200);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_strips_trailing_semicolon() {
        assert_eq!(
            enforce("SELECT * FROM items;", 200),
            "SELECT * FROM items\nLIMIT 200"
        );
    }

    #[test]
    fn test_limit_as_identifier_substring_does_not_count() {
        assert_eq!(
            enforce("SELECT limite FROM items", 10),
            "SELECT limite FROM items\nLIMIT 10"
        );
    }

    #[test]
    fn test_subquery_limit_suppresses_guard() {
        // Documented gap: any LIMIT token anywhere suppresses the guard
        let sql = "SELECT * FROM (SELECT * FROM items LIMIT 5) sub";
        assert_eq!(enforce(sql, 200), sql);
    }
}
