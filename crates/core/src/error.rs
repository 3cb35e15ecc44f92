//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Cart operations are total and never produce one of these; they show up at
/// the edges, when user or wire input is turned into domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
