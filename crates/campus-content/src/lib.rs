//! # Campus Content
//!
//! This crate provides the publishable content model for the school site:
//! the publication lifecycle, content records, and URL slug normalization.
//!
//! ## Overview
//!
//! The campus-content crate handles:
//! - **Lifecycle**: `draft -> published -> archived` with `archived` terminal
//! - **Visibility**: time-gated public visibility (publish date and expiry)
//! - **Records**: News articles, announcements and documents
//! - **Slugs**: Deterministic URL-safe identifiers derived from titles
//!
//! ## Architecture
//!
//! ```text
//! ContentRecord
//!   ├─ status ─→ PublicationStatus (lifecycle)
//!   ├─ publish_date / expiry ─→ visibility window
//!   ├─ slug ─→ slug::normalize
//!   └─ author_id / department_id (non-owning references)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use campus_content::{ContentRecord, PublicationStatus};
//! use campus_rbac::CollectionKind;
//! use chrono::{Duration, Utc};
//! use uuid::Uuid;
//!
//! let now = Utc::now();
//! let author = Uuid::now_v7();
//!
//! // Scheduled for tomorrow
//! let mut record = ContentRecord::draft(CollectionKind::News, author, now + Duration::days(1))
//!     .with_slug("Open House 2025")
//!     .unwrap();
//! record.publish(author, now).unwrap();
//!
//! assert_eq!(record.status, PublicationStatus::Published);
//! assert!(!record.is_publicly_visible_at(now));
//! ```

pub mod error;
pub mod lifecycle;
pub mod record;
pub mod slug;

// Re-export main types for convenience
pub use error::{LifecycleError, LifecycleResult, SlugError};
pub use lifecycle::{is_publicly_visible, PublicationStatus};
pub use record::ContentRecord;
