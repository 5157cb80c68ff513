//! Curated query router.
//!
//! Intercepts known high-stakes business questions and serves hand-vetted
//! parameterized queries instead of LLM-generated SQL. Matching is a
//! deterministic, ordered cascade over the question text; absence of a
//! match is a normal outcome and the caller falls back to the agent.

mod rules;
mod types;

pub use types::{CuratedQuery, VizHint};

use rules::Question;
use tracing::info;

/// Match a natural-language question against the curated rules.
///
/// Pure, no I/O, never errors. Returns the first rule whose trigger
/// condition holds, or `None` when the question should go to the agent.
pub fn detect_curated_query(question: &str) -> Option<CuratedQuery> {
    let q = Question::new(question);
    for rule in rules::RULES {
        if let Some(curated) = rule(&q) {
            info!(key = %curated.key, "curated query matched");
            return Some(curated);
        }
    }
    None
}
