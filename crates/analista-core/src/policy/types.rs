//! Outcome types for SQL validation.

use serde::Serialize;
use thiserror::Error;

/// Result of validating one SQL string.
///
/// Validation is total: every input maps to exactly one of these two
/// variants, and rejections are expected, frequently-occurring values
/// rather than errors to propagate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationOutcome {
    /// The statement is safe; carries the comment-stripped SQL text
    Accepted(String),
    /// The statement was refused for the given reason
    Rejected(RejectionReason),
}

impl ValidationOutcome {
    /// Whether the statement was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Convert into a `Result` for use at integration seams
    pub fn into_result(self) -> Result<String, RejectionReason> {
        match self {
            Self::Accepted(sql) => Ok(sql),
            Self::Rejected(reason) => Err(reason),
        }
    }
}

/// Closed set of reasons a statement can be refused.
///
/// Messages are surfaced verbatim to the end user (the product speaks
/// Spanish) and to operational logs.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    /// Empty or whitespace-only input
    #[error("Consulta vacía")]
    EmptyQuery,

    /// A semicolon remains inside the statement body (statement stacking)
    #[error("No se permiten múltiples sentencias SQL")]
    MultipleStatements,

    /// The statement does not begin with SELECT or WITH
    #[error("Solo se permiten consultas SELECT")]
    NotReadOnly,

    /// A write/DDL/procedural keyword appears as a whole word
    #[error("Comando no permitido: {0}")]
    ForbiddenKeyword(String),

    /// Referenced relations outside the allowlist, sorted, all listed
    #[error("Tabla no permitida: {}", .0.join(", "))]
    ForbiddenTable(Vec<String>),
}

impl RejectionReason {
    /// Stable identifier for logs and telemetry
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty_query",
            Self::MultipleStatements => "multiple_statements",
            Self::NotReadOnly => "not_read_only",
            Self::ForbiddenKeyword(_) => "forbidden_keyword",
            Self::ForbiddenTable(_) => "forbidden_table",
        }
    }
}
