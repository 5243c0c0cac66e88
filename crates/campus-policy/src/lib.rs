//! # Campus Policy
//!
//! This crate decides who may do what in the school content store, and
//! carries the publishing workflow that sits behind those decisions.
//!
//! ## Overview
//!
//! The campus-policy crate handles:
//! - **Access policy**: Read, create, update, delete, unlock and admin-panel
//!   checks per collection
//! - **Read filters**: Visibility narrowing for anonymous readers of gated
//!   collections
//! - **Hooks**: Slug normalization, authorship stamping and last-login
//!   recording
//! - **Lockout**: Failed login counting and account locks
//!
//! Checks return `bool`. Errors only come out of actions that run a check and
//! then change something.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use campus_content::{ContentRecord, PublicationStatus};
//! use campus_policy::{AccessPolicy, MemoryStore};
//! use campus_rbac::{Actor, CollectionKind, Role, RoleSet};
//! use chrono::{Duration, Utc};
//! use uuid::Uuid;
//!
//! let policy = AccessPolicy::new(Arc::new(MemoryStore::new()));
//! let now = Utc::now();
//!
//! let mut news = ContentRecord::draft(CollectionKind::News, Uuid::now_v7(), now + Duration::days(1));
//! news.status = PublicationStatus::Published;
//!
//! // Scheduled news stays hidden from the public until its publish date
//! assert!(!policy.can_read_at(None, Some(&news), CollectionKind::News, now));
//!
//! let teacher = Actor::new(RoleSet::single(Role::Teacher));
//! assert!(policy.can_read_at(Some(&teacher), Some(&news), CollectionKind::News, now));
//! ```
//!
//! ## Cross-Crate Integration
//!
//! This crate builds on:
//! - `campus-rbac`: Roles, actions, collections and actors
//! - `campus-content`: Publication lifecycle, slugs and content records

pub mod config;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod hooks;
pub mod lockout;
pub mod store;

// Re-export main types
pub use config::{ConfigError, PolicyConfig};
pub use error::{PolicyError, PolicyResult};
pub use evaluator::{AccessPolicy, AccessRequest};
pub use filter::{ReadAccess, ReadFilter};
pub use hooks::{after_login, before_change, before_validate_slug, Operation};
pub use lockout::{LockState, LoginGuard};
pub use store::{MemoryStore, RecordStore, StoreError, StoreResult, StoredRecord};
