//! Actor and user domain models
//!
//! An [`Actor`] is the identity snapshot handed to the policy evaluator for
//! one request. A [`User`] is the stored account the actor is derived from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::{Role, RoleSet};

/// An authenticated identity with its roles.
///
/// Anonymous callers have no `Actor`; policy functions take
/// `Option<&Actor>` and treat `None` as anonymous.
///
/// # Examples
///
/// ```
/// use campus_rbac::{Actor, Role, RoleSet};
///
/// let editor = Actor::new(RoleSet::default());
/// assert!(editor.has_role(Role::Editor));
/// assert!(!editor.is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Account identifier
    pub id: Uuid,

    /// Roles held by the account
    #[serde(default)]
    pub roles: RoleSet,
}

impl Actor {
    /// Create an actor with a fresh UUID v7 identifier.
    pub fn new(roles: RoleSet) -> Self {
        Self::with_id(Uuid::now_v7(), roles)
    }

    /// Create an actor for an existing account identifier.
    pub fn with_id(id: Uuid, roles: RoleSet) -> Self {
        Self { id, roles }
    }

    /// Check if the actor holds a role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.has_role(role)
    }

    /// Check if the actor holds at least one of the given roles.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.roles.has_any_role(roles)
    }

    /// Shorthand for `has_role(Role::Admin)`.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// Account status of a stored user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Normal account
    #[default]
    Active,
    /// Account disabled by its owner or an administrator
    Inactive,
    /// Account suspended by an administrator
    Suspended,
}

impl AccountStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::Suspended => "suspended",
        }
    }
}

/// A stored account in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique account ID
    pub id: Uuid,

    /// Login email
    pub email: String,

    /// Display name
    pub name: String,

    /// Roles held by the account
    #[serde(default)]
    pub roles: RoleSet,

    /// Account status
    #[serde(default)]
    pub status: AccountStatus,

    /// Department the account belongs to (teachers and staff only)
    pub department_id: Option<Uuid>,

    /// Last successful login
    pub last_login: Option<DateTime<Utc>>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active account holding the default role set.
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_rbac::{AccountStatus, Role, User};
    ///
    /// let user = User::new("siti@example.sch.id", "Siti");
    /// assert!(user.roles.has_role(Role::Editor));
    /// assert_eq!(user.status, AccountStatus::Active);
    /// ```
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            name: name.into(),
            roles: RoleSet::default(),
            status: AccountStatus::Active,
            department_id: None,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    /// Replace the role set.
    pub fn with_roles(mut self, roles: RoleSet) -> Self {
        self.roles = roles;
        self
    }

    /// Attach the account to a department.
    pub fn with_department(mut self, department_id: Uuid) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Check if the department reference applies to this account.
    ///
    /// Only teachers and staff are attached to a department.
    pub fn department_applies(&self) -> bool {
        self.roles.iter().any(|role| role.is_department_member())
    }

    /// Department reference, ignored for accounts it does not apply to.
    pub fn department(&self) -> Option<Uuid> {
        self.department_id.filter(|_| self.department_applies())
    }

    /// Check if the account may sign in.
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Identity snapshot used for policy evaluation.
    pub fn actor(&self) -> Actor {
        Actor::with_id(self.id, self.roles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_roles() {
        let actor = Actor::new(RoleSet::parse(["admin", "teacher"]).unwrap());
        assert!(actor.is_admin());
        assert!(actor.has_role(Role::Teacher));
        assert!(actor.has_any_role(&[Role::Student, Role::Teacher]));
        assert!(!actor.has_any_role(&[Role::Student, Role::Guest]));
    }

    #[test]
    fn test_actor_deserializes_with_default_role() {
        let id = Uuid::now_v7();
        let json = format!(r#"{{"id":"{}"}}"#, id);
        let actor: Actor = serde_json::from_str(&json).unwrap();
        assert_eq!(actor.id, id);
        assert!(actor.has_role(Role::Editor));
    }

    #[test]
    fn test_user_actor_snapshot() {
        let user = User::new("budi@example.sch.id", "Budi")
            .with_roles(RoleSet::single(Role::Student));
        let actor = user.actor();
        assert_eq!(actor.id, user.id);
        assert!(actor.has_role(Role::Student));
        assert!(!actor.has_role(Role::Editor));
    }

    #[test]
    fn test_department_only_for_personnel() {
        let department = Uuid::now_v7();

        let teacher = User::new("a@example.sch.id", "A")
            .with_roles(RoleSet::single(Role::Teacher))
            .with_department(department);
        assert_eq!(teacher.department(), Some(department));

        let student = User::new("b@example.sch.id", "B")
            .with_roles(RoleSet::single(Role::Student))
            .with_department(department);
        assert!(!student.department_applies());
        assert_eq!(student.department(), None);
    }

    #[test]
    fn test_account_status() {
        let mut user = User::new("c@example.sch.id", "C");
        assert!(user.is_active());
        user.status = AccountStatus::Suspended;
        assert!(!user.is_active());
        assert_eq!(user.status.as_str(), "suspended");
    }
}
