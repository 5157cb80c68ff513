//! Heuristic extraction of referenced relations and CTE names.
//!
//! This is deliberately regex-grade analysis, not a parser: it must stay
//! simple enough to audit by inspection. Identifiers following FROM/JOIN
//! are treated as base relations; names defined with `AS (` inside a
//! statement that opens with WITH are local common table expressions and
//! exempt from the allowlist.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Identifier following FROM or JOIN, with optional schema qualification
static TABLE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:FROM|JOIN)\s+([a-zA-Z_][\w.]*)").unwrap());

/// Statement opening with WITH
static WITH_OPENER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*WITH\b").unwrap());

/// CTE definition: name immediately followed by `AS (`
static CTE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b([a-zA-Z_]\w*)\s+AS\s*\(").unwrap());

/// Collect the lower-cased base relations referenced after FROM/JOIN,
/// stripped of schema qualification and double quotes.
pub fn referenced_tables(sql: &str) -> HashSet<String> {
    TABLE_REF
        .captures_iter(sql)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            let name = m.as_str();
            let base = name.rsplit('.').next().unwrap_or(name);
            base.trim_matches('"').to_lowercase()
        })
        .collect()
}

/// Collect the lower-cased CTE names defined within this query.
///
/// Only statements that open with WITH can define CTEs; anything else
/// returns the empty set.
pub fn cte_names(sql: &str) -> HashSet<String> {
    if !WITH_OPENER.is_match(sql) {
        return HashSet::new();
    }
    CTE_NAME
        .captures_iter(sql)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_from() {
        assert_eq!(referenced_tables("SELECT * FROM items"), set(&["items"]));
    }

    #[test]
    fn test_join_and_case_insensitive() {
        assert_eq!(
            referenced_tables("select * from Facturas f join ITEMS i on i.nombre = f.nombre"),
            set(&["facturas", "items"])
        );
    }

    #[test]
    fn test_schema_qualification_stripped() {
        assert_eq!(
            referenced_tables("SELECT * FROM public.facturas"),
            set(&["facturas"])
        );
    }

    #[test]
    fn test_quoted_identifier_unwrapped() {
        assert_eq!(
            referenced_tables(r#"SELECT * FROM "items""#),
            set(&["items"])
        );
    }

    #[test]
    fn test_join_against_subquery_is_not_a_table() {
        let sql = "SELECT * FROM items i LEFT JOIN (SELECT nombre FROM facturas) v ON v.nombre = i.nombre";
        assert_eq!(referenced_tables(sql), set(&["items", "facturas"]));
    }

    #[test]
    fn test_cte_names_require_with_opener() {
        assert!(cte_names("SELECT x AS (weird) FROM items").is_empty());
    }

    #[test]
    fn test_cte_names_collected() {
        let sql = "WITH recent AS (SELECT 1), totals AS (SELECT 2) SELECT * FROM recent";
        assert_eq!(cte_names(sql), set(&["recent", "totals"]));
    }

    #[test]
    fn test_cte_names_case_insensitive() {
        let sql = "with Recientes AS (SELECT 1) SELECT * FROM recientes";
        assert_eq!(cte_names(sql), set(&["recientes"]));
    }
}
