//! Error types for forkline
//!
//! Shared error type for configuration, I/O and rejected pipelines

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// forkline error type
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Pipeline
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A step of a task pipeline rejected
    #[error("Rejected: {step} - {message}")]
    Rejected { step: String, message: String },

    // ========================================================================
    // External error conversion
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // ========================================================================
    // Other
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Rejection helper for a named pipeline step
    pub fn rejected(step: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Rejected {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from configuration rather than a running pipeline
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::TomlParse(_) | Error::TomlSerialize(_)
        )
    }
}

// ============================================================================
// From (additional conversions)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let err = Error::rejected("upsert", "connection refused");
        assert_eq!(err.to_string(), "Rejected: upsert - connection refused");
        assert!(!err.is_config());
    }

    #[test]
    fn test_string_conversion() {
        let err: Error = "boom".into();
        assert!(matches!(err, Error::Internal(ref m) if m == "boom"));
    }

    #[test]
    fn test_toml_error_is_config() {
        let parse = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: Error = parse.into();
        assert!(err.is_config());
    }
}
