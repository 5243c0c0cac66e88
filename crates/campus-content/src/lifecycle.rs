//! Publication lifecycle
//!
//! Content moves `draft -> published -> archived`, with `archived` also
//! reachable straight from `draft`. Nothing leaves `archived`.
//!
//! A published record is only visible to anonymous readers once its publish
//! date has passed and before its expiry, which lets editors schedule
//! publication ahead of time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LifecycleError, LifecycleResult};

/// Publication status of a content record.
///
/// # Examples
///
/// ```
/// use campus_content::PublicationStatus;
///
/// assert!(PublicationStatus::Draft.can_transition_to(PublicationStatus::Published));
/// assert!(PublicationStatus::Published.can_transition_to(PublicationStatus::Archived));
/// assert!(!PublicationStatus::Archived.can_transition_to(PublicationStatus::Published));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    /// Work in progress, visible to signed-in accounts only
    #[default]
    Draft,

    /// Published, visible to everyone once the publish date passes
    Published,

    /// Withdrawn for good
    Archived,
}

impl PublicationStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Draft => "draft",
            PublicationStatus::Published => "published",
            PublicationStatus::Archived => "archived",
        }
    }

    /// Parse status from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(PublicationStatus::Draft),
            "published" => Some(PublicationStatus::Published),
            "archived" => Some(PublicationStatus::Archived),
            _ => None,
        }
    }

    /// Check if no transition leaves this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PublicationStatus::Archived)
    }

    /// Check if moving to `next` is a real transition of the lifecycle.
    ///
    /// Staying in the same status is not a transition.
    pub fn can_transition_to(&self, next: PublicationStatus) -> bool {
        matches!(
            (self, next),
            (PublicationStatus::Draft, PublicationStatus::Published)
                | (PublicationStatus::Draft, PublicationStatus::Archived)
                | (PublicationStatus::Published, PublicationStatus::Archived)
        )
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a status change.
///
/// # Returns
///
/// `Ok(true)` for a real transition, `Ok(false)` when `from == to`
/// (nothing to do, including re-archiving).
///
/// # Errors
///
/// [`LifecycleError::InvalidTransition`] for anything leaving `archived` and
/// for `published -> draft`.
pub fn transition(from: PublicationStatus, to: PublicationStatus) -> LifecycleResult<bool> {
    if from.can_transition_to(to) {
        Ok(true)
    } else if from == to {
        Ok(false)
    } else {
        Err(LifecycleError::InvalidTransition { from, to })
    }
}

/// Visibility predicate for readers without an account.
///
/// True iff `status == published`, `publish_date <= now`, and the record has
/// either no expiry or an expiry strictly after `now`.
pub fn is_publicly_visible(
    status: PublicationStatus,
    publish_date: DateTime<Utc>,
    expiry: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    status == PublicationStatus::Published
        && publish_date <= now
        && expiry.map_or(true, |expiry| expiry > now)
}
