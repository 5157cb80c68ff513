//! SQL safety policy for read-only queries.
//!
//! Last line of defense before any SQL reaches the database connection.
//! The validator proves a statement is a single read-only query touching
//! only allowlisted relations, by conservative textual analysis; anything
//! it cannot positively prove safe is rejected. It performs no I/O and is
//! a pure function of the input string and the fixed policy tables.

mod comments;
mod limit;
mod tables;
mod types;

pub use types::{RejectionReason, ValidationOutcome};

use crate::config::SafetyConfig;
use crate::error::{AnalistaError, AnalistaResult};
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

/// Compiled safety policy.
///
/// Built once at startup from a validated [`SafetyConfig`]; immutable and
/// safe to share across any number of callers.
pub struct SqlPolicy {
    allowed_tables: HashSet<String>,
    /// Keyword and its compiled whole-word pattern, in configured order
    keyword_patterns: Vec<(String, Regex)>,
    default_row_limit: u32,
}

impl SqlPolicy {
    /// Compile the policy. Fails fast on an unusable configuration.
    pub fn new(config: &SafetyConfig) -> AnalistaResult<Self> {
        config.validate()?;

        let allowed_tables = config
            .allowed_tables
            .iter()
            .map(|t| t.to_lowercase())
            .collect();

        let mut keyword_patterns = Vec::with_capacity(config.dangerous_keywords.len());
        for keyword in &config.dangerous_keywords {
            let upper = keyword.to_uppercase();
            let pattern = format!(r"\b{}\b", regex::escape(&upper));
            let re = Regex::new(&pattern).map_err(|e| {
                AnalistaError::policy(format!("invalid dangerous keyword '{keyword}': {e}"))
            })?;
            keyword_patterns.push((upper, re));
        }

        Ok(Self {
            allowed_tables,
            keyword_patterns,
            default_row_limit: config.default_row_limit,
        })
    }

    /// Validate one SQL string against the policy.
    ///
    /// Checks run in a fixed order and the first failure wins: emptiness,
    /// comment stripping, single statement, read-only prefix, dangerous
    /// keywords, table allowlist (with CTE-name exemption). On acceptance
    /// the comment-stripped statement is returned.
    pub fn validate(&self, sql: &str) -> ValidationOutcome {
        if sql.trim().is_empty() {
            return ValidationOutcome::Rejected(RejectionReason::EmptyQuery);
        }

        let clean = comments::strip(sql);
        let upper = clean.to_uppercase();

        // Statement stacking: any semicolon left after dropping the tail
        if clean.trim_end_matches(';').contains(';') {
            return ValidationOutcome::Rejected(RejectionReason::MultipleStatements);
        }

        if !(upper.starts_with("SELECT") || upper.starts_with("WITH")) {
            return ValidationOutcome::Rejected(RejectionReason::NotReadOnly);
        }

        for (keyword, re) in &self.keyword_patterns {
            if re.is_match(&upper) {
                return ValidationOutcome::Rejected(RejectionReason::ForbiddenKeyword(
                    keyword.clone(),
                ));
            }
        }

        let referenced = tables::referenced_tables(&clean);
        let ctes = tables::cte_names(&clean);
        let mut offending: Vec<String> = referenced
            .into_iter()
            .filter(|t| !self.allowed_tables.contains(t) && !ctes.contains(t))
            .collect();
        if !offending.is_empty() {
            offending.sort();
            return ValidationOutcome::Rejected(RejectionReason::ForbiddenTable(offending));
        }

        debug!(len = clean.len(), "SQL statement passed safety policy");
        ValidationOutcome::Accepted(clean)
    }

    /// Apply the row-limit guard to an already-validated statement.
    ///
    /// Idempotent. A LIMIT anywhere in the text, including inside a
    /// subquery, suppresses the guard; known limitation.
    pub fn enforce_default_limit(&self, sql: &str) -> String {
        limit::enforce(sql, self.default_row_limit)
    }

    /// The configured row cap
    pub fn default_row_limit(&self) -> u32 {
        self.default_row_limit
    }
}
