//! Record store contract
//!
//! The policy engine does not own persistence. It reaches the content store
//! through [`RecordStore`], which the storage layer implements. The only
//! lookups the policy needs are find-by-id (for update checks) and a
//! last-login update (for the after-login hook).

use async_trait::async_trait;
use campus_content::ContentRecord;
use campus_rbac::{CollectionKind, RoleSet, User};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Record store error types.
///
/// A lookup that finds nothing is `Ok(None)`, not an error.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A write targeted a record that does not exist
    #[error("Record not found: {collection}/{id}")]
    NotFound {
        /// Collection searched
        collection: CollectionKind,
        /// Missing record ID
        id: Uuid,
    },

    /// The store could not be reached or timed out
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A record as returned by the store.
#[derive(Debug, Clone)]
pub enum StoredRecord {
    /// An account from the `users` collection
    User(User),
    /// A publishable record
    Content(ContentRecord),
}

impl StoredRecord {
    /// Record ID.
    pub fn id(&self) -> Uuid {
        match self {
            StoredRecord::User(user) => user.id,
            StoredRecord::Content(record) => record.id,
        }
    }

    /// Collection the record belongs to.
    pub fn collection(&self) -> CollectionKind {
        match self {
            StoredRecord::User(_) => CollectionKind::Users,
            StoredRecord::Content(record) => record.collection,
        }
    }

    /// Roles of a stored account, `None` for content.
    pub fn roles(&self) -> Option<&RoleSet> {
        match self {
            StoredRecord::User(user) => Some(&user.roles),
            StoredRecord::Content(_) => None,
        }
    }

    /// The content record, `None` for accounts.
    pub fn as_content(&self) -> Option<&ContentRecord> {
        match self {
            StoredRecord::Content(record) => Some(record),
            StoredRecord::User(_) => None,
        }
    }
}

/// Collection store consulted by the policy engine.
///
/// Timeouts and retries are the implementation's concern; the policy awaits
/// each call as-is.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a record by collection and ID.
    async fn find_by_id(&self, collection: CollectionKind, id: Uuid) -> StoreResult<Option<StoredRecord>>;

    /// Set the last successful login of an account.
    async fn record_login(&self, user_id: Uuid, at: DateTime<Utc>) -> StoreResult<()>;
}

/// In-memory record store.
///
/// Suitable for tests and single-process embedding.
pub struct MemoryStore {
    /// Records keyed by collection and ID
    records: Arc<RwLock<HashMap<(CollectionKind, Uuid), StoredRecord>>>,
    /// When set, every call fails with `Unavailable`
    failing: AtomicBool,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("failing", &self.failing.load(Ordering::Relaxed))
            .finish()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            failing: AtomicBool::new(false),
        }
    }

    /// Insert or replace an account.
    pub async fn insert_user(&self, user: User) {
        self.records
            .write()
            .await
            .insert((CollectionKind::Users, user.id), StoredRecord::User(user));
    }

    /// Insert or replace a content record.
    pub async fn insert_content(&self, record: ContentRecord) {
        self.records
            .write()
            .await
            .insert((record.collection, record.id), StoredRecord::Content(record));
    }

    /// Remove a record, returning it if present.
    pub async fn remove(&self, collection: CollectionKind, id: Uuid) -> Option<StoredRecord> {
        self.records.write().await.remove(&(collection, id))
    }

    /// Fetch an account by ID.
    pub async fn user(&self, id: Uuid) -> Option<User> {
        match self.records.read().await.get(&(CollectionKind::Users, id)) {
            Some(StoredRecord::User(user)) => Some(user.clone()),
            _ => None,
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Make every call fail with `Unavailable` (or stop doing so).
    ///
    /// Used to exercise outage handling.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("memory store set to fail".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_by_id(&self, collection: CollectionKind, id: Uuid) -> StoreResult<Option<StoredRecord>> {
        self.check_available()?;
        Ok(self.records.read().await.get(&(collection, id)).cloned())
    }

    async fn record_login(&self, user_id: Uuid, at: DateTime<Utc>) -> StoreResult<()> {
        self.check_available()?;
        let mut records = self.records.write().await;
        match records.get_mut(&(CollectionKind::Users, user_id)) {
            Some(StoredRecord::User(user)) => {
                user.last_login = Some(at);
                Ok(())
            }
            _ => Err(StoreError::NotFound {
                collection: CollectionKind::Users,
                id: user_id,
            }),
        }
    }
}
