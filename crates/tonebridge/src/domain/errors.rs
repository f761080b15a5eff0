//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
///
/// A failed conversion surfaces exactly one of these; no partial
/// `ToneMessage` is ever produced alongside an error.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The provider call could not complete (network, auth, quota, server error)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The provider replied with text that is not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// The reply is valid JSON but does not have the expected shape
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    pub fn missing_field<T: AsRef<str>>(field: T) -> Self {
        Self::ContractViolation(format!(
            "reply is missing required field '{}'",
            field.as_ref()
        ))
    }

    /// True for failures of the remote call itself rather than of its payload
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
