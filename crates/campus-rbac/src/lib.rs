//! # Campus RBAC (Role-Based Access Control)
//!
//! This crate provides the identity and role model for the school site
//! content store, together with the catalog of collections that access
//! rules are written against.
//!
//! ## Overview
//!
//! The campus-rbac crate handles:
//! - **Roles**: The closed set {admin, editor, teacher, staff, student, guest}
//! - **Role Sets**: Non-empty, non-exclusive role assignments (default `editor`)
//! - **Actors**: Identity snapshots passed to the policy evaluator
//! - **Users**: Stored accounts with status and department
//! - **Actions**: Operations requested against a collection
//! - **Collections**: Every collection and global of the site
//!
//! ## Usage
//!
//! ```rust
//! use campus_rbac::{Actor, CollectionKind, Role, RoleSet};
//!
//! let roles = RoleSet::parse(["teacher"]).unwrap();
//! let actor = Actor::new(roles);
//! assert!(actor.has_any_role(&[Role::Teacher, Role::Staff]));
//!
//! assert!(CollectionKind::News.has_lifecycle());
//! assert!(RoleSet::parse(["headmaster"]).is_err());
//! ```
//!
//! ## Integration with campus-policy
//!
//! Roles carry no permissions by themselves. The rules that decide what each
//! role may do live in `campus-policy`.

pub mod actions;
pub mod actor;
pub mod collections;
pub mod error;
pub mod roles;

// Re-export main types for convenience
pub use actions::Action;
pub use actor::{AccountStatus, Actor, User};
pub use collections::CollectionKind;
pub use error::{RoleError, RoleResult};
pub use roles::{Role, RoleSet};
