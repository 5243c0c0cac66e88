//! Error types for content operations

use thiserror::Error;

use crate::lifecycle::PublicationStatus;

/// Slug normalization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    /// Normalization left nothing (the input had no ASCII letters or digits)
    #[error("Slug normalization produced an empty result")]
    EmptyResult,
}

/// Publication lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The requested transition is not part of the lifecycle
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: PublicationStatus,
        /// Requested status
        to: PublicationStatus,
    },
}

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

impl LifecycleError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            LifecycleError::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}
