//! Policy configuration.
//!
//! Login lockout settings and the set of collections whose records are hidden
//! from anonymous readers until publicly visible. Loaded from environment
//! variables with defaults matching the school site's account settings.

use campus_rbac::CollectionKind;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted account lock, one year.
pub const MAX_LOCK_TIME_SECS: u64 = 365 * 24 * 60 * 60;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Policy engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Consecutive failed logins before an account is locked.
    pub max_login_attempts: u32,

    /// How long a locked account stays locked, in seconds.
    pub lock_time_secs: u64,

    /// Collections whose records anonymous readers only see while publicly
    /// visible.
    pub gated_collections: Vec<CollectionKind>,
}

impl Default for PolicyConfig {
    /// Five attempts, ten minute lock, every lifecycle collection gated.
    fn default() -> Self {
        Self {
            max_login_attempts: 5,
            lock_time_secs: 600,
            gated_collections: CollectionKind::all()
                .into_iter()
                .filter(CollectionKind::has_lifecycle)
                .collect(),
        }
    }
}

impl PolicyConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CAMPUS_MAX_LOGIN_ATTEMPTS`: Failed logins before lockout (default: 5)
    /// - `CAMPUS_LOCK_TIME_SECS`: Lock duration in seconds (default: 600)
    /// - `CAMPUS_GATED_COLLECTIONS`: Comma-separated collection slugs
    ///   (default: news,announcements,documents)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to the defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let max_login_attempts = match lookup("CAMPUS_MAX_LOGIN_ATTEMPTS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("CAMPUS_MAX_LOGIN_ATTEMPTS", format!("not a number: {}", raw)))?,
            None => default.max_login_attempts,
        };

        let lock_time_secs = match lookup("CAMPUS_LOCK_TIME_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("CAMPUS_LOCK_TIME_SECS", format!("not a number: {}", raw)))?,
            None => default.lock_time_secs,
        };

        let gated_collections = match lookup("CAMPUS_GATED_COLLECTIONS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|slug| !slug.is_empty())
                .map(|slug| {
                    CollectionKind::parse(slug).ok_or_else(|| {
                        ConfigError::invalid("CAMPUS_GATED_COLLECTIONS", format!("unknown collection: {}", slug))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => default.gated_collections,
        };

        let config = Self {
            max_login_attempts,
            lock_time_secs,
            gated_collections,
        };
        config.validate()?;
        Ok(config)
    }

    /// Get the lock duration, capped at [`MAX_LOCK_TIME_SECS`].
    pub fn lock_time(&self) -> Duration {
        let secs = self.lock_time_secs.min(MAX_LOCK_TIME_SECS) as i64;
        Duration::try_seconds(secs).unwrap_or_else(|| Duration::seconds(MAX_LOCK_TIME_SECS as i64))
    }

    /// Check if anonymous reads of `collection` are narrowed to visible records.
    pub fn is_gated(&self, collection: CollectionKind) -> bool {
        self.gated_collections.contains(&collection)
    }

    /// Validate the configuration.
    ///
    /// Lockout values must be positive, the lock at most a year, and every
    /// gated collection must carry a publication lifecycle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_login_attempts == 0 {
            return Err(ConfigError::invalid("CAMPUS_MAX_LOGIN_ATTEMPTS", "must be at least 1"));
        }
        if self.lock_time_secs == 0 || self.lock_time_secs > MAX_LOCK_TIME_SECS {
            return Err(ConfigError::invalid(
                "CAMPUS_LOCK_TIME_SECS",
                format!("must be between 1 and {}", MAX_LOCK_TIME_SECS),
            ));
        }
        if let Some(kind) = self.gated_collections.iter().find(|kind| !kind.has_lifecycle()) {
            return Err(ConfigError::invalid(
                "CAMPUS_GATED_COLLECTIONS",
                format!("{} has no publication lifecycle", kind),
            ));
        }
        Ok(())
    }
}
