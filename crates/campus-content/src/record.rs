//! Content record domain model
//!
//! A [`ContentRecord`] is any publishable item: a news article, an
//! announcement or a document. Author and department are plain references
//! used for filtering; they never own the record.

use campus_rbac::CollectionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LifecycleResult, SlugError};
use crate::lifecycle::{self, PublicationStatus};
use crate::slug;

/// A publishable record.
///
/// # Examples
///
/// ```
/// use campus_content::{ContentRecord, PublicationStatus};
/// use campus_rbac::CollectionKind;
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let author = Uuid::now_v7();
/// let mut record = ContentRecord::draft(CollectionKind::News, author, Utc::now());
/// assert_eq!(record.status, PublicationStatus::Draft);
///
/// record.publish(author, Utc::now()).unwrap();
/// assert_eq!(record.published_by, Some(author));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique record ID
    pub id: Uuid,

    /// Collection the record belongs to
    pub collection: CollectionKind,

    /// URL slug (news articles)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Publication status
    #[serde(default)]
    pub status: PublicationStatus,

    /// Date from which the record may be shown publicly
    pub publish_date: DateTime<Utc>,

    /// End of the visibility window (`expiryDate` or `validUntil`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,

    /// Account that created the record
    pub author_id: Option<Uuid>,

    /// Department the record relates to
    pub department_id: Option<Uuid>,

    /// When the record was published
    pub published_at: Option<DateTime<Utc>>,

    /// Who published the record
    pub published_by: Option<Uuid>,

    /// When the record was archived
    pub archived_at: Option<DateTime<Utc>>,
}

impl ContentRecord {
    /// Creates a new draft authored by `author_id`.
    ///
    /// # Arguments
    ///
    /// * `collection` - The owning collection
    /// * `author_id` - The authoring account
    /// * `publish_date` - When the record may become publicly visible
    pub fn draft(collection: CollectionKind, author_id: Uuid, publish_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            collection,
            slug: None,
            status: PublicationStatus::Draft,
            publish_date,
            expiry: None,
            author_id: Some(author_id),
            department_id: None,
            published_at: None,
            published_by: None,
            archived_at: None,
        }
    }

    /// Set the slug, normalizing it first.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::EmptyResult`] when the text has nothing to keep.
    pub fn with_slug(mut self, text: &str) -> Result<Self, SlugError> {
        self.slug = Some(slug::normalize(text)?);
        Ok(self)
    }

    /// Set the end of the visibility window.
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Relate the record to a department.
    pub fn with_department(mut self, department_id: Uuid) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Publish the record, stamping publisher and time.
    ///
    /// Publishing a published record changes nothing and keeps the original
    /// stamps.
    ///
    /// # Returns
    ///
    /// `true` if the status changed
    ///
    /// # Errors
    ///
    /// Fails with `InvalidTransition` when the record is archived.
    pub fn publish(&mut self, publisher: Uuid, now: DateTime<Utc>) -> LifecycleResult<bool> {
        let changed = lifecycle::transition(self.status, PublicationStatus::Published)?;
        if changed {
            self.status = PublicationStatus::Published;
            self.stamp_published(publisher, now);
        }
        Ok(changed)
    }

    /// Archive the record.
    ///
    /// # Returns
    ///
    /// `true` if the status changed
    pub fn archive(&mut self, now: DateTime<Utc>) -> LifecycleResult<bool> {
        let changed = lifecycle::transition(self.status, PublicationStatus::Archived)?;
        if changed {
            self.status = PublicationStatus::Archived;
            self.archived_at = Some(now);
        }
        Ok(changed)
    }

    /// Record who published the record and when, unless already stamped.
    pub fn stamp_published(&mut self, publisher: Uuid, now: DateTime<Utc>) {
        if self.published_at.is_none() {
            self.published_at = Some(now);
            self.published_by = Some(publisher);
        }
    }

    /// Check if anonymous readers may see the record at `now`.
    pub fn is_publicly_visible_at(&self, now: DateTime<Utc>) -> bool {
        lifecycle::is_publicly_visible(self.status, self.publish_date, self.expiry, now)
    }

    /// Check if the record is visible to anonymous readers right now.
    pub fn is_publicly_visible(&self) -> bool {
        self.is_publicly_visible_at(Utc::now())
    }

    /// Check if the record accepts edits.
    pub fn is_editable(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Check if the record is published with a publish date still ahead.
    pub fn is_scheduled_at(&self, now: DateTime<Utc>) -> bool {
        self.status == PublicationStatus::Published && self.publish_date > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifecycleError;
    use chrono::Duration;

    fn news(now: DateTime<Utc>) -> ContentRecord {
        ContentRecord::draft(CollectionKind::News, Uuid::now_v7(), now)
    }

    #[test]
    fn test_new_draft() {
        let now = Utc::now();
        let author = Uuid::now_v7();
        let record = ContentRecord::draft(CollectionKind::Announcements, author, now);
        assert_eq!(record.status, PublicationStatus::Draft);
        assert_eq!(record.author_id, Some(author));
        assert!(record.published_at.is_none());
        assert!(record.is_editable());
        assert!(!record.is_publicly_visible_at(now));
    }

    #[test]
    fn test_publish_stamps_once() {
        let now = Utc::now();
        let mut record = news(now);
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();

        assert_eq!(record.publish(first, now), Ok(true));
        assert_eq!(record.status, PublicationStatus::Published);
        assert_eq!(record.published_by, Some(first));
        assert_eq!(record.published_at, Some(now));

        let later = now + Duration::minutes(5);
        assert_eq!(record.publish(second, later), Ok(false));
        assert_eq!(record.published_by, Some(first));
        assert_eq!(record.published_at, Some(now));
    }

    #[test]
    fn test_archived_cannot_be_published() {
        let now = Utc::now();
        let mut record = news(now);
        assert_eq!(record.archive(now), Ok(true));
        assert_eq!(record.archived_at, Some(now));
        assert!(!record.is_editable());

        let err = record.publish(Uuid::now_v7(), now).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidTransition {
                from: PublicationStatus::Archived,
                to: PublicationStatus::Published,
            }
        );
        assert_eq!(record.status, PublicationStatus::Archived);
        assert!(record.published_at.is_none());
        assert_eq!(record.archive(now), Ok(false));
    }

    #[test]
    fn test_published_then_archived() {
        let now = Utc::now();
        let mut record = news(now - Duration::days(1));
        record.publish(Uuid::now_v7(), now).unwrap();
        assert!(record.is_publicly_visible_at(now));
        record.archive(now).unwrap();
        assert!(!record.is_publicly_visible_at(now));
    }

    #[test]
    fn test_scheduled_publication() {
        let now = Utc::now();
        let mut record = news(now + Duration::hours(1));
        record.publish(Uuid::now_v7(), now).unwrap();
        assert!(record.is_scheduled_at(now));
        assert!(!record.is_publicly_visible_at(now));
        assert!(record.is_publicly_visible_at(now + Duration::hours(2)));
    }

    #[test]
    fn test_expired_announcement() {
        let now = Utc::now();
        let mut record = ContentRecord::draft(
            CollectionKind::Announcements,
            Uuid::now_v7(),
            now - Duration::days(3),
        )
        .with_expiry(now - Duration::days(1));
        record.publish(Uuid::now_v7(), now).unwrap();
        assert!(!record.is_publicly_visible_at(now));
    }

    #[test]
    fn test_with_slug_normalizes() {
        let now = Utc::now();
        let record = news(now).with_slug("Juara 1 Lomba LKS!").unwrap();
        assert_eq!(record.slug.as_deref(), Some("juara-1-lomba-lks"));
        assert_eq!(news(now).with_slug("???").unwrap_err(), SlugError::EmptyResult);
    }

    #[test]
    fn test_serde_round_trip_keeps_status() {
        let now = Utc::now();
        let mut record = news(now);
        record.publish(Uuid::now_v7(), now).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "published");
        assert_eq!(json["collection"], "news");
        let back: ContentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
