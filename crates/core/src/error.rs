//! Error model shared by the qualifier and configurator crates.

use thiserror::Error;

/// Result type used across the model layer.
pub type ModelResult<T> = Result<T, ModelError>;

/// Model-level error.
///
/// Every variant reports caller misuse: nothing here is retried or recovered
/// locally, and no partial result accompanies an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A binding attribute holds no value.
    #[error("malformed qualifier value: {0}")]
    Malformed(String),

    /// A configurator was used outside its Open state.
    #[error("lifecycle violation: {0}")]
    Lifecycle(String),

    /// A descriptor or value failed validation (unknown attribute, wrong kind).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A requested element is not known.
    #[error("not found: {0}")]
    NotFound(String),

    /// An element with the same identity is already registered.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl ModelError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Lifecycle(_))
    }
}
