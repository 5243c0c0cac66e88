//! Access policy evaluator
//!
//! The single decision point for every request against the content store.
//! Checks return `bool`; a denial is a normal outcome, never an error.
//!
//! | Action | `users` | other collections |
//! |--------|---------|-------------------|
//! | read   | everyone | everyone; gated records only once publicly visible for anonymous readers |
//! | create | admin, editor | admin, editor; globals never |
//! | update | admin: anyone; editor: anyone but admins; others: themselves | admin, editor; others only the record carrying their own id; archived records never |
//! | delete | admin | admin |
//! | unlock | admin | - |
//! | admin panel | admin, editor | - |

use std::sync::Arc;

use campus_content::ContentRecord;
use campus_rbac::{Action, Actor, CollectionKind, Role, RoleSet, User};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::PolicyConfig;
use crate::error::{PolicyError, PolicyResult};
use crate::filter::{ReadAccess, ReadFilter};
use crate::hooks::{self, Operation};
use crate::store::{RecordStore, StoredRecord};

/// Roles that may manage accounts and content and enter the admin panel.
const MANAGER_ROLES: [Role; 2] = [Role::Admin, Role::Editor];

fn is_manager(actor: &Actor) -> bool {
    actor.has_any_role(&MANAGER_ROLES)
}

/// Role part of the update rule outside `users`: managers pass, anyone else
/// only for the record whose id is their own.
fn may_update(actor: &Actor, target_id: Option<Uuid>) -> bool {
    is_manager(actor) || target_id == Some(actor.id)
}

/// A request routed through [`AccessPolicy::check`].
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    /// Acting account, `None` for anonymous
    pub actor: Option<&'a Actor>,
    /// Requested action
    pub action: Action,
    /// Target collection
    pub collection: CollectionKind,
    /// Target record ID, if the request names one
    pub target_id: Option<Uuid>,
}

impl<'a> AccessRequest<'a> {
    /// Create a collection-level request.
    pub fn new(actor: Option<&'a Actor>, action: Action, collection: CollectionKind) -> Self {
        Self {
            actor,
            action,
            collection,
            target_id: None,
        }
    }

    /// Name the target record.
    pub fn with_target(mut self, id: Uuid) -> Self {
        self.target_id = Some(id);
        self
    }
}

/// Access policy evaluator.
///
/// Holds no mutable state; one instance can serve concurrent requests.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use campus_policy::{AccessPolicy, MemoryStore};
/// use campus_rbac::{Actor, CollectionKind, Role, RoleSet};
///
/// let policy = AccessPolicy::new(Arc::new(MemoryStore::new()));
/// let admin = Actor::new(RoleSet::single(Role::Admin));
/// let student = Actor::new(RoleSet::single(Role::Student));
///
/// assert!(policy.can_delete(Some(&admin), CollectionKind::News));
/// assert!(!policy.can_delete(Some(&student), CollectionKind::News));
/// assert!(!policy.can_create(Some(&student), CollectionKind::Users));
/// ```
pub struct AccessPolicy<S: ?Sized> {
    config: PolicyConfig,
    store: Arc<S>,
}

impl<S: ?Sized> std::fmt::Debug for AccessPolicy<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessPolicy")
            .field("config", &self.config)
            .finish()
    }
}

impl<S: RecordStore + ?Sized> AccessPolicy<S> {
    /// Create an evaluator with the default configuration.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, PolicyConfig::default())
    }

    /// Create an evaluator with a custom configuration.
    pub fn with_config(store: Arc<S>, config: PolicyConfig) -> Self {
        Self { config, store }
    }

    /// Create an evaluator configured from `CAMPUS_*` environment variables.
    ///
    /// # Errors
    ///
    /// `Config` when a variable does not parse or validate.
    pub fn from_env(store: Arc<S>) -> PolicyResult<Self> {
        Ok(Self::with_config(store, PolicyConfig::from_env()?))
    }

    /// Get the configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Get the record store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // --- read ---

    /// Decide whether `actor` may read `target` (or list `collection`).
    pub fn can_read(
        &self,
        actor: Option<&Actor>,
        target: Option<&ContentRecord>,
        collection: CollectionKind,
    ) -> bool {
        self.can_read_at(actor, target, collection, Utc::now())
    }

    /// [`can_read`](Self::can_read) evaluated at `now`.
    ///
    /// Signed-in accounts read everything. Anonymous readers read everything
    /// except records of gated collections outside their visibility window.
    /// Listing a gated collection is allowed; use
    /// [`read_access_at`](Self::read_access_at) to get the narrowing filter.
    pub fn can_read_at(
        &self,
        actor: Option<&Actor>,
        target: Option<&ContentRecord>,
        collection: CollectionKind,
        now: DateTime<Utc>,
    ) -> bool {
        if actor.is_some() || !self.config.is_gated(collection) {
            return true;
        }
        let allowed = target.map_or(true, |record| record.is_publicly_visible_at(now));
        if !allowed {
            tracing::debug!(collection = %collection, "anonymous read of hidden record denied");
        }
        allowed
    }

    /// Collection-level read decision.
    pub fn read_access(&self, actor: Option<&Actor>, collection: CollectionKind) -> ReadAccess {
        self.read_access_at(actor, collection, Utc::now())
    }

    /// [`read_access`](Self::read_access) evaluated at `now`.
    pub fn read_access_at(
        &self,
        actor: Option<&Actor>,
        collection: CollectionKind,
        now: DateTime<Utc>,
    ) -> ReadAccess {
        if actor.is_some() || !self.config.is_gated(collection) {
            ReadAccess::All
        } else {
            ReadAccess::Filtered(ReadFilter::published_as_of(collection, now))
        }
    }

    // --- create ---

    /// Decide whether `actor` may create records in `collection`.
    ///
    /// Admins and editors only. Globals are single documents and are never
    /// created.
    pub fn can_create(&self, actor: Option<&Actor>, collection: CollectionKind) -> bool {
        !collection.is_global() && actor.map_or(false, is_manager)
    }

    // --- update ---

    /// Decide whether `actor` may update the record `target_id` of `collection`.
    ///
    /// `target_id` is `None` when the update is an upsert with no record yet.
    /// This is the only check that consults the store.
    pub async fn can_update(
        &self,
        actor: Option<&Actor>,
        collection: CollectionKind,
        target_id: Option<Uuid>,
    ) -> bool {
        let Some(actor) = actor else {
            return false;
        };
        let allowed = if collection == CollectionKind::Users {
            self.can_update_user(actor, target_id).await
        } else if !may_update(actor, target_id) {
            false
        } else if collection.has_lifecycle() {
            self.target_is_editable(collection, target_id).await
        } else {
            true
        };
        tracing::debug!(
            actor_id = %actor.id,
            collection = %collection,
            target_id = ?target_id,
            allowed,
            "update decision"
        );
        allowed
    }

    async fn can_update_user(&self, actor: &Actor, target_id: Option<Uuid>) -> bool {
        if actor.is_admin() {
            return true;
        }

        if actor.has_role(Role::Editor) {
            let Some(target_id) = target_id else {
                return true;
            };
            return match self.store.find_by_id(CollectionKind::Users, target_id).await {
                Ok(Some(StoredRecord::User(target))) => !target.roles.has_role(Role::Admin),
                // Not stored yet: the update creates it.
                Ok(None) => true,
                Ok(Some(other)) => {
                    tracing::warn!(
                        target_id = %target_id,
                        collection = %other.collection(),
                        "users lookup returned a non-user record"
                    );
                    false
                }
                Err(e) => {
                    tracing::warn!(error = %e, target_id = %target_id, "target lookup failed, denying update");
                    false
                }
            };
        }

        target_id == Some(actor.id)
    }

    async fn target_is_editable(&self, collection: CollectionKind, target_id: Option<Uuid>) -> bool {
        let Some(target_id) = target_id else {
            return true;
        };
        match self.store.find_by_id(collection, target_id).await {
            Ok(Some(StoredRecord::Content(record))) => record.is_editable(),
            Ok(None) => true,
            Ok(Some(_)) => false,
            Err(e) => {
                tracing::warn!(error = %e, target_id = %target_id, "target lookup failed, denying update");
                false
            }
        }
    }

    /// Decide whether `actor` may edit a content record already at hand.
    ///
    /// Same role rule as [`can_update`](Self::can_update); archived records
    /// accept no edits.
    pub fn can_edit_record(&self, actor: Option<&Actor>, record: &ContentRecord) -> bool {
        actor.map_or(false, |actor| may_update(actor, Some(record.id))) && record.is_editable()
    }

    // --- delete and administrative overrides ---

    /// Decide whether `actor` may delete from `collection`. Admin only.
    pub fn can_delete(&self, actor: Option<&Actor>, _collection: CollectionKind) -> bool {
        actor.map_or(false, Actor::is_admin)
    }

    /// Decide whether `actor` may unlock a locked account. Admin only.
    pub fn can_unlock(&self, actor: Option<&Actor>) -> bool {
        actor.map_or(false, Actor::is_admin)
    }

    /// Decide whether `actor` may enter the admin panel.
    pub fn can_access_admin(&self, actor: Option<&Actor>) -> bool {
        actor.map_or(false, is_manager)
    }

    /// Route a request to the matching check.
    ///
    /// Reads are answered at the collection level; a `true` for an anonymous
    /// read of a gated collection still implies the filter from
    /// [`read_access`](Self::read_access).
    pub async fn check(&self, request: &AccessRequest<'_>) -> bool {
        let AccessRequest {
            actor,
            action,
            collection,
            target_id,
        } = *request;
        match action {
            Action::Read => self.can_read(actor, None, collection),
            Action::Create => self.can_create(actor, collection),
            Action::Update => self.can_update(actor, collection, target_id).await,
            Action::Delete => self.can_delete(actor, collection),
            Action::AccessAdmin => self.can_access_admin(actor),
            Action::Unlock => self.can_unlock(actor),
        }
    }

    // --- actions behind a check ---

    /// Run the create-time hooks on a new content record.
    ///
    /// Normalizes the slug (collections without slugs drop it), defaults the
    /// author to the acting account and stamps the publisher when the record
    /// is created already published.
    ///
    /// # Errors
    ///
    /// `Forbidden` when the actor may not create in the record's collection;
    /// `Slug` when the slug normalizes to nothing.
    pub fn prepare_create(
        &self,
        actor: Option<&Actor>,
        record: &mut ContentRecord,
        now: DateTime<Utc>,
    ) -> PolicyResult<()> {
        let actor = self.require(self.can_create(actor, record.collection), actor, Action::Create, record.collection)?;
        record.slug = if record.collection.has_slug() {
            hooks::before_validate_slug(record.slug.as_deref())?
        } else {
            None
        };
        hooks::before_change(record, Operation::Create, actor, now);
        Ok(())
    }

    /// Publish a record on behalf of `actor`.
    ///
    /// # Returns
    ///
    /// `true` if the status changed
    ///
    /// # Errors
    ///
    /// `Forbidden` unless the update role rule allows `actor`; `Lifecycle`
    /// when the record is archived.
    pub fn publish(
        &self,
        actor: Option<&Actor>,
        record: &mut ContentRecord,
        now: DateTime<Utc>,
    ) -> PolicyResult<bool> {
        let allowed = actor.map_or(false, |actor| may_update(actor, Some(record.id)));
        let actor = self.require(allowed, actor, Action::Update, record.collection)?;
        let changed = record.publish(actor.id, now)?;
        if changed {
            tracing::info!(record_id = %record.id, collection = %record.collection, publisher = %actor.id, "record published");
        }
        Ok(changed)
    }

    /// Archive a record on behalf of `actor`.
    ///
    /// # Returns
    ///
    /// `true` if the status changed
    pub fn archive(
        &self,
        actor: Option<&Actor>,
        record: &mut ContentRecord,
        now: DateTime<Utc>,
    ) -> PolicyResult<bool> {
        let allowed = actor.map_or(false, |actor| may_update(actor, Some(record.id)));
        let actor = self.require(allowed, actor, Action::Update, record.collection)?;
        let changed = record.archive(now)?;
        if changed {
            tracing::info!(record_id = %record.id, collection = %record.collection, actor_id = %actor.id, "record archived");
        }
        Ok(changed)
    }

    /// Replace the roles of `user` on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// `Forbidden` when the update check denies, or when a non-admin grants
    /// `admin`; `Role` when a tag is not a known role. The user is left
    /// untouched on error.
    pub async fn assign_roles<T>(
        &self,
        actor: Option<&Actor>,
        user: &mut User,
        tags: &[T],
    ) -> PolicyResult<()>
    where
        T: AsRef<str> + Sync,
    {
        let allowed = self.can_update(actor, CollectionKind::Users, Some(user.id)).await;
        let actor = self.require(allowed, actor, Action::Update, CollectionKind::Users)?;
        let roles = RoleSet::parse(tags)?;
        if roles.has_role(Role::Admin) && !actor.is_admin() {
            tracing::warn!(actor_id = %actor.id, user_id = %user.id, "admin grant by non-admin refused");
            return Err(PolicyError::Forbidden {
                action: Action::Update,
                collection: CollectionKind::Users,
            });
        }
        user.roles = roles;
        Ok(())
    }

    fn require<'a>(
        &self,
        allowed: bool,
        actor: Option<&'a Actor>,
        action: Action,
        collection: CollectionKind,
    ) -> PolicyResult<&'a Actor> {
        match actor {
            Some(actor) if allowed => Ok(actor),
            _ => Err(PolicyError::Forbidden { action, collection }),
        }
    }
}
