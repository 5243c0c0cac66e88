//! Login lockout
//!
//! Counts consecutive failed logins per account and locks the account for a
//! fixed period once the limit is reached. Only an admin may lift a lock
//! early.

use std::collections::HashMap;

use campus_rbac::Actor;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::PolicyConfig;
use crate::evaluator::AccessPolicy;
use crate::store::RecordStore;

/// Lock state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Logins are accepted
    Open {
        /// Failures left before the account locks
        remaining_attempts: u32,
    },
    /// Logins are refused until the given instant
    Locked {
        /// End of the lock
        until: DateTime<Utc>,
    },
}

impl LockState {
    /// Check if the account is locked.
    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked { .. })
    }
}

#[derive(Debug, Clone, Default)]
struct LoginAttempts {
    failures: u32,
    locked_until: Option<DateTime<Utc>>,
}

/// Per-account failed login tracker.
///
/// # Examples
///
/// ```
/// use campus_policy::{LoginGuard, PolicyConfig};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let guard = LoginGuard::from_config(&PolicyConfig::default());
/// let user_id = Uuid::now_v7();
/// let now = Utc::now();
///
/// for _ in 0..5 {
///     guard.record_failure(user_id, now).await;
/// }
/// assert!(guard.lock_state(user_id, now).await.is_locked());
/// # }
/// ```
pub struct LoginGuard {
    max_attempts: u32,
    lock_time: Duration,
    entries: RwLock<HashMap<Uuid, LoginAttempts>>,
}

impl std::fmt::Debug for LoginGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginGuard")
            .field("max_attempts", &self.max_attempts)
            .field("lock_time", &self.lock_time)
            .finish()
    }
}

impl LoginGuard {
    /// Create a guard.
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Consecutive failures that lock the account (at least 1)
    /// * `lock_time` - How long the lock lasts
    pub fn new(max_attempts: u32, lock_time: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            lock_time,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a guard from the policy configuration.
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(config.max_login_attempts, config.lock_time())
    }

    /// Get the lock state of an account at `now`.
    pub async fn lock_state(&self, user_id: Uuid, now: DateTime<Utc>) -> LockState {
        let entries = self.entries.read().await;
        match entries.get(&user_id) {
            Some(LoginAttempts {
                locked_until: Some(until),
                ..
            }) if *until > now => LockState::Locked { until: *until },
            Some(entry) if entry.locked_until.is_none() => LockState::Open {
                remaining_attempts: self.max_attempts.saturating_sub(entry.failures),
            },
            // Unknown account, or a lock that has run out
            _ => LockState::Open {
                remaining_attempts: self.max_attempts,
            },
        }
    }

    /// Record a failed login.
    ///
    /// Failures while locked do not extend the lock. The first failure after
    /// a lock runs out starts a fresh count.
    ///
    /// # Returns
    ///
    /// The lock state after the failure
    pub async fn record_failure(&self, user_id: Uuid, now: DateTime<Utc>) -> LockState {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(user_id).or_default();

        if let Some(until) = entry.locked_until {
            if until > now {
                return LockState::Locked { until };
            }
            *entry = LoginAttempts::default();
        }

        entry.failures += 1;
        if entry.failures >= self.max_attempts {
            let until = now
                .checked_add_signed(self.lock_time)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            entry.locked_until = Some(until);
            tracing::info!(user_id = %user_id, failures = entry.failures, until = %until, "account locked");
            return LockState::Locked { until };
        }

        LockState::Open {
            remaining_attempts: self.max_attempts - entry.failures,
        }
    }

    /// Record a successful login, clearing the failure count.
    ///
    /// Callers check [`lock_state`](Self::lock_state) first; a success does
    /// not lift an active lock.
    pub async fn record_success(&self, user_id: Uuid, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        let locked = entries
            .get(&user_id)
            .and_then(|entry| entry.locked_until)
            .map_or(false, |until| until > now);
        if !locked {
            entries.remove(&user_id);
        }
    }

    /// Lift the lock on an account.
    ///
    /// # Returns
    ///
    /// `false` if `actor` may not unlock accounts, `true` once the account
    /// is open again
    pub async fn unlock<S>(&self, policy: &AccessPolicy<S>, actor: Option<&Actor>, user_id: Uuid) -> bool
    where
        S: RecordStore + ?Sized,
    {
        if !policy.can_unlock(actor) {
            tracing::warn!(user_id = %user_id, "unlock refused");
            return false;
        }
        if self.entries.write().await.remove(&user_id).is_some() {
            tracing::info!(user_id = %user_id, "account unlocked");
        }
        true
    }
}

impl Default for LoginGuard {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use campus_rbac::{Role, RoleSet};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_locks_after_max_attempts() {
        let guard = LoginGuard::new(3, Duration::minutes(10));
        let user_id = Uuid::now_v7();
        let now = Utc::now();

        assert_eq!(
            guard.record_failure(user_id, now).await,
            LockState::Open { remaining_attempts: 2 }
        );
        assert_eq!(
            guard.record_failure(user_id, now).await,
            LockState::Open { remaining_attempts: 1 }
        );
        assert_eq!(
            guard.record_failure(user_id, now).await,
            LockState::Locked {
                until: now + Duration::minutes(10)
            }
        );
        assert!(guard.lock_state(user_id, now + Duration::minutes(9)).await.is_locked());
    }

    #[tokio::test]
    async fn test_failures_while_locked_do_not_extend() {
        let guard = LoginGuard::new(1, Duration::minutes(10));
        let user_id = Uuid::now_v7();
        let now = Utc::now();

        guard.record_failure(user_id, now).await;
        let later = now + Duration::minutes(5);
        assert_eq!(
            guard.record_failure(user_id, later).await,
            LockState::Locked {
                until: now + Duration::minutes(10)
            }
        );
    }

    #[tokio::test]
    async fn test_lock_expires() {
        let guard = LoginGuard::new(2, Duration::minutes(10));
        let user_id = Uuid::now_v7();
        let now = Utc::now();

        guard.record_failure(user_id, now).await;
        guard.record_failure(user_id, now).await;

        let after = now + Duration::minutes(10);
        assert_eq!(
            guard.lock_state(user_id, after).await,
            LockState::Open { remaining_attempts: 2 }
        );
        // Fresh count after the lock ran out
        assert_eq!(
            guard.record_failure(user_id, after).await,
            LockState::Open { remaining_attempts: 1 }
        );
    }

    #[tokio::test]
    async fn test_success_resets_count() {
        let guard = LoginGuard::default();
        let user_id = Uuid::now_v7();
        let now = Utc::now();

        for _ in 0..4 {
            guard.record_failure(user_id, now).await;
        }
        guard.record_success(user_id, now).await;
        assert_eq!(
            guard.lock_state(user_id, now).await,
            LockState::Open { remaining_attempts: 5 }
        );
    }

    #[tokio::test]
    async fn test_success_does_not_lift_lock() {
        let guard = LoginGuard::new(1, Duration::minutes(10));
        let user_id = Uuid::now_v7();
        let now = Utc::now();

        guard.record_failure(user_id, now).await;
        guard.record_success(user_id, now).await;
        assert!(guard.lock_state(user_id, now).await.is_locked());
    }

    #[tokio::test]
    async fn test_lock_past_calendar_end_saturates() {
        let guard = LoginGuard::new(1, Duration::days(365 * 300_000));
        let user_id = Uuid::now_v7();
        let now = Utc::now();

        assert_eq!(
            guard.record_failure(user_id, now).await,
            LockState::Locked {
                until: DateTime::<Utc>::MAX_UTC
            }
        );
        assert!(guard.lock_state(user_id, now).await.is_locked());
    }

    #[tokio::test]
    async fn test_unlock_requires_admin() {
        let policy = AccessPolicy::new(Arc::new(MemoryStore::new()));
        let guard = LoginGuard::new(1, Duration::minutes(10));
        let user_id = Uuid::now_v7();
        let now = Utc::now();
        guard.record_failure(user_id, now).await;

        let editor = Actor::new(RoleSet::single(Role::Editor));
        assert!(!guard.unlock(&policy, Some(&editor), user_id).await);
        assert!(!guard.unlock(&policy, None, user_id).await);
        assert!(guard.lock_state(user_id, now).await.is_locked());

        let admin = Actor::new(RoleSet::single(Role::Admin));
        assert!(guard.unlock(&policy, Some(&admin), user_id).await);
        assert!(!guard.lock_state(user_id, now).await.is_locked());
    }
}
