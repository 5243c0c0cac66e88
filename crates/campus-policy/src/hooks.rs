//! Record lifecycle hooks
//!
//! Side effects the content store runs around validation, writes and logins.

use campus_content::{slug, ContentRecord, PublicationStatus, SlugError};
use campus_rbac::Actor;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::store::RecordStore;

/// Kind of write a hook runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// A new record
    Create,
    /// An existing record
    Update,
}

/// Normalize a submitted slug before validation.
///
/// An absent slug stays absent.
///
/// # Errors
///
/// [`SlugError::EmptyResult`] when the text has no ASCII letters or digits.
pub fn before_validate_slug(raw: Option<&str>) -> Result<Option<String>, SlugError> {
    raw.map(slug::normalize).transpose()
}

/// Stamp authorship before a record is written.
///
/// On create the author defaults to the acting account, and a record created
/// already published gets its publisher stamped. Updates change nothing here;
/// publishing an existing record goes through [`ContentRecord::publish`].
pub fn before_change(record: &mut ContentRecord, operation: Operation, actor: &Actor, now: DateTime<Utc>) {
    if operation != Operation::Create {
        return;
    }
    if record.author_id.is_none() {
        record.author_id = Some(actor.id);
    }
    if record.status == PublicationStatus::Published {
        record.stamp_published(actor.id, now);
    }
}

/// Record a successful login.
///
/// Failures are logged and swallowed; a store hiccup must not fail the login.
pub async fn after_login<S>(store: &S, user_id: Uuid, now: DateTime<Utc>)
where
    S: RecordStore + ?Sized,
{
    match store.record_login(user_id, now).await {
        Ok(()) => tracing::debug!(user_id = %user_id, "last login recorded"),
        Err(e) => tracing::error!(error = %e, user_id = %user_id, "Failed to record last login"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use campus_rbac::{CollectionKind, Role, RoleSet, User};

    #[test]
    fn test_before_validate_slug() {
        assert_eq!(
            before_validate_slug(Some("Hari Guru Nasional 2025")).unwrap(),
            Some("hari-guru-nasional-2025".to_string())
        );
        assert_eq!(before_validate_slug(None).unwrap(), None);
        assert_eq!(before_validate_slug(Some("  --  ")), Err(SlugError::EmptyResult));
    }

    #[test]
    fn test_before_change_on_create() {
        let actor = Actor::new(RoleSet::single(Role::Teacher));
        let now = Utc::now();
        let mut record = ContentRecord::draft(CollectionKind::News, actor.id, now);
        record.author_id = None;

        before_change(&mut record, Operation::Create, &actor, now);
        assert_eq!(record.author_id, Some(actor.id));
        // Drafts are not stamped
        assert!(record.published_at.is_none());

        record.status = PublicationStatus::Published;
        before_change(&mut record, Operation::Create, &actor, now);
        assert_eq!(record.published_by, Some(actor.id));
        assert_eq!(record.published_at, Some(now));
    }

    #[test]
    fn test_before_change_keeps_existing_values() {
        let author = Uuid::now_v7();
        let actor = Actor::new(RoleSet::single(Role::Editor));
        let now = Utc::now();
        let mut record = ContentRecord::draft(CollectionKind::Announcements, author, now);
        record.status = PublicationStatus::Published;

        before_change(&mut record, Operation::Update, &actor, now);
        assert_eq!(record.author_id, Some(author));
        assert!(record.published_by.is_none());

        before_change(&mut record, Operation::Create, &actor, now);
        assert_eq!(record.author_id, Some(author));
        assert_eq!(record.published_by, Some(actor.id));
    }

    #[tokio::test]
    async fn test_after_login_updates_last_login() {
        let store = MemoryStore::new();
        let user = User::new("siswa@example.sch.id", "Siswa");
        let id = user.id;
        store.insert_user(user).await;

        let now = Utc::now();
        after_login(&store, id, now).await;
        assert_eq!(store.user(id).await.and_then(|u| u.last_login), Some(now));
    }

    #[tokio::test]
    async fn test_after_login_swallows_failures() {
        let store = MemoryStore::new();
        // Unknown account
        after_login(&store, Uuid::now_v7(), Utc::now()).await;

        let user = User::new("staf@example.sch.id", "Staf");
        let id = user.id;
        store.insert_user(user).await;
        store.set_failing(true);
        after_login(&store, id, Utc::now()).await;

        store.set_failing(false);
        assert!(store.user(id).await.and_then(|u| u.last_login).is_none());
    }
}
