//! # Actions
//!
//! Defines the operations an actor can request against a collection.
//! Every request reaching the content store maps to exactly one action.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions that can be requested against a collection.
///
/// - **Read**: Fetch one record or query a collection
/// - **Create**: Insert a new record
/// - **Update**: Modify an existing record (or upsert without an id)
/// - **Delete**: Remove a record
/// - **AccessAdmin**: Enter the administration panel
/// - **Unlock**: Clear a login lock on a user account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read/view records.
    Read,

    /// Create new records.
    Create,

    /// Update existing records.
    Update,

    /// Delete records.
    Delete,

    /// Access the administration panel.
    AccessAdmin,

    /// Unlock a locked user account.
    Unlock,
}

impl Action {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::AccessAdmin => "admin",
            Action::Unlock => "unlock",
        }
    }

    /// Parse action from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, supports aliases)
    ///
    /// # Returns
    ///
    /// `Some(Action)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use campus_rbac::actions::Action;
    ///
    /// assert_eq!(Action::parse("read"), Some(Action::Read));
    /// assert_eq!(Action::parse("find"), Some(Action::Read)); // Alias
    /// assert_eq!(Action::parse("patch"), Some(Action::Update)); // Alias
    /// assert_eq!(Action::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "read" | "find" | "get" | "view" => Some(Action::Read),
            "create" | "post" => Some(Action::Create),
            "update" | "edit" | "put" | "patch" => Some(Action::Update),
            "delete" | "remove" => Some(Action::Delete),
            "admin" | "access_admin" => Some(Action::AccessAdmin),
            "unlock" => Some(Action::Unlock),
            _ => None,
        }
    }

    /// Get all actions.
    pub fn all() -> Vec<Self> {
        vec![
            Action::Read,
            Action::Create,
            Action::Update,
            Action::Delete,
            Action::AccessAdmin,
            Action::Unlock,
        ]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parsing() {
        assert_eq!(Action::parse("read"), Some(Action::Read));
        assert_eq!(Action::parse("FIND"), Some(Action::Read));
        assert_eq!(Action::parse("create"), Some(Action::Create));
        assert_eq!(Action::parse("post"), Some(Action::Create));
        assert_eq!(Action::parse("patch"), Some(Action::Update));
        assert_eq!(Action::parse("remove"), Some(Action::Delete));
        assert_eq!(Action::parse("admin"), Some(Action::AccessAdmin));
        assert_eq!(Action::parse("unlock"), Some(Action::Unlock));
        assert_eq!(Action::parse("manage"), None);
    }

    #[test]
    fn test_action_round_trips_through_as_str() {
        for action in Action::all() {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_all_actions_count() {
        assert_eq!(Action::all().len(), 6);
    }
}
