//! Unified error type for the domain layer
//!
//! Keeps validation failures as values so callers can branch on them
//! without exception-style control flow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects such as data URIs)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for rule violations: empty required
    /// fields, values outside allowed ranges, and the like.
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Creates a parse error for malformed value-object input.
    pub fn parse(msg: impl Into<String>) -> Self {
        DomainError::Parse(msg.into())
    }
}
