//! Unified error types for the domain layer
//!
//! Provides a common error type used across domain operations, so editors
//! and services report failures without resorting to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., required field empty)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Operation does not apply to this question type
    #[error("Operation not supported for {question_type}: {operation}")]
    UnsupportedOperation {
        question_type: &'static str,
        operation: &'static str,
    },

    /// Index outside the payload's current bounds
    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Creates a validation error for a violated editing rule.
    ///
    /// Use this when required fields are empty or a value is outside its
    /// allowed range. Validation errors keep the editor open; they are
    /// never fatal.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
