//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A request identifier is invalid.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A collection name is invalid.
    #[error("invalid collection name: {0}")]
    InvalidName(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
