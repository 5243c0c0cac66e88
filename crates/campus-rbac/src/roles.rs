//! Site roles
//!
//! This module defines the closed set of roles an actor can hold and the
//! non-empty role set carried by every actor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{RoleError, RoleResult};

/// A role an actor can hold on the school site.
///
/// Roles are not hierarchical: an actor may hold several at once and each
/// policy rule names the roles it accepts.
///
/// # Examples
///
/// ```
/// use campus_rbac::Role;
///
/// assert_eq!(Role::parse("Admin"), Some(Role::Admin));
/// assert_eq!(Role::Teacher.as_str(), "teacher");
/// assert_eq!(Role::parse("owner"), None);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full control over users and content
    Admin,

    /// Manages content and non-admin users
    Editor,

    /// Teaching staff, usually attached to a department
    Teacher,

    /// Non-teaching staff, usually attached to a department
    Staff,

    /// Enrolled student
    Student,

    /// Visitor account with no special rights
    Guest,
}

impl Role {
    /// Role assigned when none is specified.
    pub const DEFAULT: Role = Role::Editor;

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, surrounding whitespace ignored)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "teacher" => Some(Self::Teacher),
            "staff" => Some(Self::Staff),
            "student" => Some(Self::Student),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Teacher => "teacher",
            Self::Staff => "staff",
            Self::Student => "student",
            Self::Guest => "guest",
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::Teacher => "Teacher",
            Self::Staff => "Staff",
            Self::Student => "Student",
            Self::Guest => "Guest",
        }
    }

    /// Get all roles.
    pub fn all() -> [Role; 6] {
        [
            Role::Admin,
            Role::Editor,
            Role::Teacher,
            Role::Staff,
            Role::Student,
            Role::Guest,
        ]
    }

    /// Check if this role belongs to department personnel.
    ///
    /// Teachers and staff are the roles that carry a department reference.
    pub fn is_department_member(&self) -> bool {
        matches!(self, Role::Teacher | Role::Staff)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty, unordered set of roles.
///
/// Construction from an empty input yields the default role set
/// (`{editor}`), so a `RoleSet` value is never empty.
///
/// # Examples
///
/// ```
/// use campus_rbac::{Role, RoleSet};
///
/// let roles = RoleSet::parse(["teacher", "staff"]).unwrap();
/// assert!(roles.has_role(Role::Teacher));
/// assert!(roles.has_any_role(&[Role::Admin, Role::Staff]));
///
/// let defaulted = RoleSet::parse(Vec::<String>::new()).unwrap();
/// assert!(defaulted.has_role(Role::Editor));
///
/// assert!(RoleSet::parse(["teacher", "principal"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RoleSet {
    roles: BTreeSet<Role>,
}

impl RoleSet {
    /// Create a role set holding a single role.
    pub fn single(role: Role) -> Self {
        let mut roles = BTreeSet::new();
        roles.insert(role);
        Self { roles }
    }

    /// Create a role set from already validated roles.
    ///
    /// An empty iterator yields the default role set.
    pub fn from_roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        let roles: BTreeSet<Role> = roles.into_iter().collect();
        if roles.is_empty() {
            return Self::default();
        }
        Self { roles }
    }

    /// Validate raw role tags against the closed role enumeration.
    ///
    /// # Arguments
    ///
    /// * `tags` - Raw role strings (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::InvalidRole`] naming the first tag that is not a
    /// known role.
    pub fn parse<I, S>(tags: I) -> RoleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles = BTreeSet::new();
        for tag in tags {
            let tag = tag.as_ref();
            let role = Role::parse(tag).ok_or_else(|| RoleError::InvalidRole(tag.to_string()))?;
            roles.insert(role);
        }
        Ok(Self::from_roles(roles))
    }

    /// Check if the set contains a role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Check if the set contains at least one of the given roles.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.roles.contains(role))
    }

    /// Add a role to the set.
    ///
    /// # Returns
    ///
    /// `true` if the role was not already present
    pub fn insert(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    /// Remove a role from the set.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::LastRole`] when `role` is the only role held.
    pub fn remove(&mut self, role: Role) -> RoleResult<bool> {
        if self.roles.len() == 1 && self.roles.contains(&role) {
            return Err(RoleError::LastRole(role.as_str()));
        }
        Ok(self.roles.remove(&role))
    }

    /// Iterate over the roles in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Number of roles held.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if the set holds no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Get the role tags as strings.
    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(|role| role.as_str().to_string()).collect()
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::single(Role::DEFAULT)
    }
}

impl TryFrom<Vec<String>> for RoleSet {
    type Error = RoleError;

    fn try_from(tags: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(tags)
    }
}

impl From<RoleSet> for Vec<String> {
    fn from(set: RoleSet) -> Self {
        set.to_strings()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self::from_roles(iter)
    }
}
