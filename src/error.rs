//! Application error types.

use thiserror::Error;

/// Application-level errors for the catalog.
#[derive(Error, Debug)]
pub enum AppError {
    // Neo4j errors
    #[error("Neo4j connection error: {0}")]
    Connection(#[from] neo4rs::Error),

    #[error("Neo4j query error: {message}")]
    Query { message: String, query: String },

    #[error("Unique constraint violated: {0}")]
    ConstraintViolation(String),

    // Domain errors
    #[error("{kind} not found: {lookup}")]
    NotFound { kind: String, lookup: String },

    #[error("Model type not implemented: {0}")]
    NotImplemented(String),

    #[error("Invalid arguments for {kind}: {message}")]
    InvalidArguments { kind: String, message: String },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds a `NotFound` for a model kind and lookup description.
    pub fn not_found(kind: impl ToString, lookup: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            lookup: lookup.to_string(),
        }
    }

    /// Builds an `InvalidArguments` for a model kind.
    pub fn invalid_arguments(kind: impl ToString, message: impl ToString) -> Self {
        Self::InvalidArguments {
            kind: kind.to_string(),
            message: message.to_string(),
        }
    }

    /// True for the recoverable "no such instance" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for caller misuse: unregistered kinds and bad creation fields.
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            Self::NotImplemented(_) | Self::InvalidArguments { .. }
        )
    }
}
