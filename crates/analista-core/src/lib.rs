//! Analista Guardrails Core Library
//!
//! This crate provides the security boundary between text produced by an
//! LLM agent and SQL statements allowed to reach the production database:
//! a conservative read-only SQL policy validator, a curated-query router
//! for known high-stakes business questions, and the fixed pipeline that
//! composes them.

pub mod config;
pub mod curated;
pub mod error;
pub mod pipeline;
pub mod policy;

// Re-export commonly used types
pub use config::SafetyConfig;
pub use curated::{detect_curated_query, CuratedQuery, VizHint};
pub use error::{AnalistaError, AnalistaResult};
pub use pipeline::{plan_question, vet_sql, VettedQuery};
pub use policy::{RejectionReason, SqlPolicy, ValidationOutcome};
