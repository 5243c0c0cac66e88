//! Error types for role and identity handling.

use thiserror::Error;

/// Errors raised while building role sets and actors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// A role tag outside the closed role enumeration.
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Removing the role would leave the set empty.
    #[error("Cannot remove the last role: {0}")]
    LastRole(&'static str),
}

/// Result type for role operations.
pub type RoleResult<T> = Result<T, RoleError>;

impl RoleError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RoleError::InvalidRole(_) => "INVALID_ROLE",
            RoleError::LastRole(_) => "LAST_ROLE",
        }
    }
}
