//! Error types for policy operations
//!
//! Authorization checks never fail: a denial is a `false` result. The errors
//! here come from actions that go through a check and then do something
//! (publishing, assigning roles, preparing a record for creation).

use campus_content::{LifecycleError, SlugError};
use campus_rbac::{Action, CollectionKind, RoleError};
use thiserror::Error;

use crate::config::ConfigError;

/// Policy action error types.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The acting account may not perform the action
    #[error("Forbidden: {action} on {collection}")]
    Forbidden {
        /// Requested action
        action: Action,
        /// Target collection
        collection: CollectionKind,
    },

    /// Lifecycle transition rejected
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Slug could not be derived
    #[error(transparent)]
    Slug(#[from] SlugError),

    /// Role tag outside the role enumeration
    #[error(transparent)]
    Role(#[from] RoleError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for policy actions.
pub type PolicyResult<T> = Result<T, PolicyError>;

impl PolicyError {
    /// Check if this error should be logged at error level.
    ///
    /// Rejected input and forbidden actions are expected and are not
    /// server errors.
    pub fn is_server_error(&self) -> bool {
        matches!(self, PolicyError::Config(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            PolicyError::Forbidden { .. } => 403,
            PolicyError::Lifecycle(_) => 409,
            PolicyError::Slug(_) | PolicyError::Role(_) => 400,
            PolicyError::Config(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            PolicyError::Forbidden { .. } => "FORBIDDEN",
            PolicyError::Lifecycle(e) => e.error_code(),
            PolicyError::Slug(SlugError::EmptyResult) => "EMPTY_SLUG",
            PolicyError::Role(e) => e.error_code(),
            PolicyError::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_content::PublicationStatus;
    use crate::config::PolicyConfig;

    #[test]
    fn test_forbidden_is_client_error() {
        let err = PolicyError::Forbidden {
            action: Action::Delete,
            collection: CollectionKind::News,
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "FORBIDDEN");
        assert!(!err.is_server_error());
        assert_eq!(err.to_string(), "Forbidden: delete on news");
    }

    #[test]
    fn test_wrapped_errors() {
        let err: PolicyError = LifecycleError::InvalidTransition {
            from: PublicationStatus::Archived,
            to: PublicationStatus::Published,
        }
        .into();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");

        let err: PolicyError = RoleError::InvalidRole("janitor".to_string()).into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_ROLE");
        assert_eq!(err.to_string(), "Invalid role: janitor");

        let err: PolicyError = SlugError::EmptyResult.into();
        assert_eq!(err.error_code(), "EMPTY_SLUG");

        let err: PolicyError = PolicyConfig::from_lookup(|_: &str| Some("0".to_string()))
            .unwrap_err()
            .into();
        assert!(err.is_server_error());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
