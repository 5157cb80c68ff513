//! Fixed composition of router and validator.
//!
//! Incoming question → curated router → (on match) safety validation of
//! the curated SQL → execution by the caller. No match → the caller asks
//! the LLM agent and feeds its SQL through [`vet_sql`]. There is no
//! trusted path that skips validation.

use crate::curated::{detect_curated_query, VizHint};
use crate::error::{AnalistaError, AnalistaResult};
use crate::policy::{RejectionReason, SqlPolicy, ValidationOutcome};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, warn};

/// A curated query that has passed the safety policy and carries the
/// row-limit guard; ready for parameter-bound execution.
#[derive(Debug, Clone, PartialEq)]
pub struct VettedQuery {
    pub key: String,
    pub sql: String,
    pub params: HashMap<String, Value>,
    pub explanation: String,
    pub viz_hint: VizHint,
}

/// Validate one SQL string and apply the row-limit guard.
///
/// The only path to executable SQL, for agent output and curated
/// templates alike. Rejections are surfaced verbatim, never repaired.
pub fn vet_sql(policy: &SqlPolicy, sql: &str) -> Result<String, RejectionReason> {
    match policy.validate(sql) {
        ValidationOutcome::Accepted(clean) => {
            let guarded = policy.enforce_default_limit(&clean);
            info!(len = guarded.len(), "SQL accepted by safety policy");
            Ok(guarded)
        }
        ValidationOutcome::Rejected(reason) => {
            warn!(kind = reason.kind(), reason = %reason, "SQL rejected by safety policy");
            Err(reason)
        }
    }
}

/// Run the curated router for a question, re-validating any hit.
///
/// A curated template failing its own policy is a programming error in
/// the rule set and comes back as [`AnalistaError::Policy`], not as a
/// user-facing rejection. `Ok(None)` means the question goes to the agent.
pub fn plan_question(policy: &SqlPolicy, question: &str) -> AnalistaResult<Option<VettedQuery>> {
    let Some(curated) = detect_curated_query(question) else {
        return Ok(None);
    };

    // Defense in depth: curated SQL goes through the same validator
    let sql = vet_sql(policy, &curated.sql).map_err(|reason| {
        AnalistaError::policy(format!(
            "curated query '{}' failed its own safety policy: {reason}",
            curated.key
        ))
    })?;

    Ok(Some(VettedQuery {
        key: curated.key,
        sql,
        params: curated.params,
        explanation: curated.explanation,
        viz_hint: curated.viz_hint,
    }))
}
