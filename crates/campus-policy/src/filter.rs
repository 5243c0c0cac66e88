//! Read filters
//!
//! Collection-level read decisions for anonymous readers are not a plain
//! yes/no: the reader may list the collection, but only records that are
//! publicly visible. [`ReadFilter`] carries that restriction so the store can
//! apply it in its query instead of post-filtering every row.

use campus_content::{ContentRecord, PublicationStatus};
use campus_rbac::CollectionKind;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

/// Restriction to records publicly visible at a point in time.
///
/// Equivalent to
/// `status = published AND publishDate <= as_of AND (expiry absent OR expiry > as_of)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFilter {
    /// Collection being read
    pub collection: CollectionKind,
    /// Instant the visibility window is evaluated at
    pub as_of: DateTime<Utc>,
}

impl ReadFilter {
    /// Filter for records of `collection` visible at `as_of`.
    pub fn published_as_of(collection: CollectionKind, as_of: DateTime<Utc>) -> Self {
        Self { collection, as_of }
    }

    /// Check a record against the filter.
    pub fn matches(&self, record: &ContentRecord) -> bool {
        record.collection == self.collection && record.is_publicly_visible_at(self.as_of)
    }

    /// Render the filter as a `where` clause for the content store.
    ///
    /// # Example
    ///
    /// ```
    /// use campus_policy::ReadFilter;
    /// use campus_rbac::CollectionKind;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let as_of = Utc.with_ymd_and_hms(2025, 7, 14, 7, 0, 0).unwrap();
    /// let clause = ReadFilter::published_as_of(CollectionKind::News, as_of).to_where_clause();
    /// assert_eq!(clause["and"][0]["status"]["equals"], "published");
    /// assert_eq!(clause["and"][1]["publishDate"]["less_than_equal"], "2025-07-14T07:00:00.000Z");
    /// ```
    pub fn to_where_clause(&self) -> Value {
        let as_of = self.as_of.to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut conditions = vec![
            json!({ "status": { "equals": PublicationStatus::Published.as_str() } }),
            json!({ "publishDate": { "less_than_equal": as_of } }),
        ];
        if let Some(field) = self.collection.expiry_field() {
            conditions.push(json!({
                "or": [
                    { field: { "exists": false } },
                    { field: { "greater_than": as_of } },
                ]
            }));
        }
        json!({ "and": conditions })
    }
}

/// Outcome of a collection-level read decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadAccess {
    /// Every record may be read
    All,
    /// Only records matching the filter may be read
    Filtered(ReadFilter),
}

impl ReadAccess {
    /// Check if a record falls inside the granted access.
    pub fn allows(&self, record: &ContentRecord) -> bool {
        match self {
            ReadAccess::All => true,
            ReadAccess::Filtered(filter) => filter.matches(record),
        }
    }

    /// Check if no restriction applies.
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, ReadAccess::All)
    }

    /// The restriction, if any.
    pub fn filter(&self) -> Option<&ReadFilter> {
        match self {
            ReadAccess::All => None,
            ReadAccess::Filtered(filter) => Some(filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn published(collection: CollectionKind, publish_date: DateTime<Utc>) -> ContentRecord {
        let mut record = ContentRecord::draft(collection, Uuid::now_v7(), publish_date);
        record.publish(Uuid::now_v7(), publish_date).unwrap();
        record
    }

    #[test]
    fn test_filter_matches_visible_records() {
        let now = Utc::now();
        let filter = ReadFilter::published_as_of(CollectionKind::News, now);

        assert!(filter.matches(&published(CollectionKind::News, now - Duration::hours(1))));
        assert!(!filter.matches(&published(CollectionKind::News, now + Duration::hours(1))));
        assert!(!filter.matches(&ContentRecord::draft(CollectionKind::News, Uuid::now_v7(), now)));
        // Records of another collection never match
        assert!(!filter.matches(&published(CollectionKind::Documents, now - Duration::hours(1))));
    }

    #[test]
    fn test_where_clause_without_expiry() {
        let as_of = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let clause = ReadFilter::published_as_of(CollectionKind::News, as_of).to_where_clause();
        assert_eq!(
            clause,
            json!({
                "and": [
                    { "status": { "equals": "published" } },
                    { "publishDate": { "less_than_equal": "2025-01-02T03:04:05.000Z" } },
                ]
            })
        );
    }

    #[test]
    fn test_where_clause_with_expiry_field() {
        let as_of = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let clause = ReadFilter::published_as_of(CollectionKind::Documents, as_of).to_where_clause();
        assert_eq!(
            clause["and"][2],
            json!({
                "or": [
                    { "validUntil": { "exists": false } },
                    { "validUntil": { "greater_than": "2025-01-02T03:04:05.000Z" } },
                ]
            })
        );

        let clause = ReadFilter::published_as_of(CollectionKind::Announcements, as_of).to_where_clause();
        assert_eq!(clause["and"][2]["or"][0]["expiryDate"]["exists"], false);
    }

    #[test]
    fn test_read_access() {
        let now = Utc::now();
        let draft = ContentRecord::draft(CollectionKind::News, Uuid::now_v7(), now);

        assert!(ReadAccess::All.allows(&draft));
        assert!(ReadAccess::All.is_unrestricted());
        assert!(ReadAccess::All.filter().is_none());

        let filtered = ReadAccess::Filtered(ReadFilter::published_as_of(CollectionKind::News, now));
        assert!(!filtered.allows(&draft));
        assert!(!filtered.is_unrestricted());
        assert_eq!(filtered.filter().map(|f| f.as_of), Some(now));
    }
}
