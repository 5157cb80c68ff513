//! Error types for the analista guardrails

use thiserror::Error;

/// Result type alias for guardrail operations
pub type AnalistaResult<T> = Result<T, AnalistaError>;

/// Main error type for the guardrail layer.
///
/// Rejections of untrusted SQL are NOT represented here: they are ordinary
/// values ([`crate::policy::RejectionReason`]). This type covers the fatal
/// conditions only, such as a broken policy configuration at startup.
#[derive(Error, Debug, Clone)]
pub enum AnalistaError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Policy construction errors (e.g. an empty allowlist)
    #[error("Policy error: {0}")]
    Policy(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),
}

impl AnalistaError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new policy error
    pub fn policy(message: impl Into<String>) -> Self {
        Self::Policy(message.into())
    }
}

impl From<std::io::Error> for AnalistaError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = AnalistaError::config("missing allowlist");
        assert_eq!(err.to_string(), "Configuration error: missing allowlist");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no file");
        let err: AnalistaError = io.into();
        assert!(matches!(err, AnalistaError::Io(_)));
    }
}
