//! # Collection Catalog
//!
//! Defines every collection and global of the school site.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collections and globals stored by the content store.
///
/// Variants are listed in the order the administration panel groups them:
/// administration, academic, content, institutional, partnership.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CollectionKind {
    // Administration
    /// Site accounts.
    Users,
    /// Uploaded images and files.
    Media,

    // Academic
    /// Study programs ("jurusan").
    Departments,
    /// Teacher profiles.
    Teachers,
    /// Downloadable documents with an optional validity end.
    Documents,
    /// Extracurricular activities.
    Extracurriculars,
    /// Student and school achievements.
    Achievements,

    // Content
    /// News articles with a full publication workflow.
    News,
    /// Calendar events.
    Events,
    /// Announcements with an optional expiry date.
    Announcements,
    /// Photo gallery.
    Gallery,

    // Institutional
    /// Organization chart.
    OrganizationStructure,
    /// Global: school profile page.
    SchoolProfile,
    /// Global: vision and mission statement.
    VisionMission,
    /// Global: about page.
    AboutPage,
    /// Global: contact details.
    ContactInfo,
    /// Global: social media links.
    SocialMedia,
    /// Global: home page banner.
    HomeBanner,
    /// Global: general school information.
    SchoolInfo,

    // Partnership
    /// Partner institutions.
    Partners,
}

impl CollectionKind {
    /// Get the collection slug used by the content store.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Users => "users",
            CollectionKind::Media => "media",
            CollectionKind::Departments => "departments",
            CollectionKind::Teachers => "teachers",
            CollectionKind::Documents => "documents",
            CollectionKind::Extracurriculars => "extracurriculars",
            CollectionKind::Achievements => "achievements",
            CollectionKind::News => "news",
            CollectionKind::Events => "events",
            CollectionKind::Announcements => "announcements",
            CollectionKind::Gallery => "gallery",
            CollectionKind::OrganizationStructure => "organizationStructure",
            CollectionKind::SchoolProfile => "schoolProfile",
            CollectionKind::VisionMission => "visionMission",
            CollectionKind::AboutPage => "aboutPage",
            CollectionKind::ContactInfo => "contactInfo",
            CollectionKind::SocialMedia => "socialMedia",
            CollectionKind::HomeBanner => "homeBanner",
            CollectionKind::SchoolInfo => "schoolInfo",
            CollectionKind::Partners => "partners",
        }
    }

    /// Parse a collection slug.
    ///
    /// # Arguments
    ///
    /// * `s` - Slug to parse (case-insensitive, accepts snake_case and kebab-case)
    ///
    /// # Returns
    ///
    /// `Some(CollectionKind)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use campus_rbac::collections::CollectionKind;
    ///
    /// assert_eq!(CollectionKind::parse("news"), Some(CollectionKind::News));
    /// assert_eq!(CollectionKind::parse("visionMission"), Some(CollectionKind::VisionMission));
    /// assert_eq!(CollectionKind::parse("vision_mission"), Some(CollectionKind::VisionMission));
    /// assert_eq!(CollectionKind::parse("blog"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "users" | "user" => Some(CollectionKind::Users),
            "media" => Some(CollectionKind::Media),
            "departments" | "department" => Some(CollectionKind::Departments),
            "teachers" | "teacher" => Some(CollectionKind::Teachers),
            "documents" | "document" => Some(CollectionKind::Documents),
            "extracurriculars" | "extracurricular" => Some(CollectionKind::Extracurriculars),
            "achievements" | "achievement" => Some(CollectionKind::Achievements),
            "news" => Some(CollectionKind::News),
            "events" | "event" => Some(CollectionKind::Events),
            "announcements" | "announcement" => Some(CollectionKind::Announcements),
            "gallery" => Some(CollectionKind::Gallery),
            "organizationstructure" => Some(CollectionKind::OrganizationStructure),
            "schoolprofile" => Some(CollectionKind::SchoolProfile),
            "visionmission" => Some(CollectionKind::VisionMission),
            "aboutpage" => Some(CollectionKind::AboutPage),
            "contactinfo" => Some(CollectionKind::ContactInfo),
            "socialmedia" => Some(CollectionKind::SocialMedia),
            "homebanner" => Some(CollectionKind::HomeBanner),
            "schoolinfo" => Some(CollectionKind::SchoolInfo),
            "partners" | "partner" => Some(CollectionKind::Partners),
            _ => None,
        }
    }

    /// Check if this is a single-document global rather than a collection.
    pub fn is_global(&self) -> bool {
        matches!(
            self,
            CollectionKind::SchoolProfile
                | CollectionKind::VisionMission
                | CollectionKind::AboutPage
                | CollectionKind::ContactInfo
                | CollectionKind::SocialMedia
                | CollectionKind::HomeBanner
                | CollectionKind::SchoolInfo
        )
    }

    /// Check if records of this collection carry a publication date window.
    ///
    /// These are the collections whose records are modelled as content
    /// records with a draft/published/archived lifecycle.
    pub fn has_lifecycle(&self) -> bool {
        matches!(
            self,
            CollectionKind::News | CollectionKind::Announcements | CollectionKind::Documents
        )
    }

    /// Name of the field that ends a record's visibility window, if any.
    pub fn expiry_field(&self) -> Option<&'static str> {
        match self {
            CollectionKind::Announcements => Some("expiryDate"),
            CollectionKind::Documents => Some("validUntil"),
            _ => None,
        }
    }

    /// Check if records of this collection carry a URL slug.
    pub fn has_slug(&self) -> bool {
        matches!(self, CollectionKind::News | CollectionKind::Departments)
    }

    /// Get all collection kinds.
    pub fn all() -> Vec<Self> {
        vec![
            CollectionKind::Users,
            CollectionKind::Media,
            CollectionKind::Departments,
            CollectionKind::Teachers,
            CollectionKind::Documents,
            CollectionKind::Extracurriculars,
            CollectionKind::Achievements,
            CollectionKind::News,
            CollectionKind::Events,
            CollectionKind::Announcements,
            CollectionKind::Gallery,
            CollectionKind::OrganizationStructure,
            CollectionKind::SchoolProfile,
            CollectionKind::VisionMission,
            CollectionKind::AboutPage,
            CollectionKind::ContactInfo,
            CollectionKind::SocialMedia,
            CollectionKind::HomeBanner,
            CollectionKind::SchoolInfo,
            CollectionKind::Partners,
        ]
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_slugs_round_trip() {
        for kind in CollectionKind::all() {
            assert_eq!(CollectionKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_collection_parse_variants() {
        assert_eq!(CollectionKind::parse("NEWS"), Some(CollectionKind::News));
        assert_eq!(
            CollectionKind::parse("organization-structure"),
            Some(CollectionKind::OrganizationStructure)
        );
        assert_eq!(CollectionKind::parse("announcement"), Some(CollectionKind::Announcements));
        assert_eq!(CollectionKind::parse(""), None);
    }

    #[test]
    fn test_serde_uses_store_slugs() {
        let json = serde_json::to_string(&CollectionKind::OrganizationStructure).unwrap();
        assert_eq!(json, r#""organizationStructure""#);
        let kind: CollectionKind = serde_json::from_str(r#""announcements""#).unwrap();
        assert_eq!(kind, CollectionKind::Announcements);
    }

    #[test]
    fn test_globals() {
        let globals: Vec<_> = CollectionKind::all()
            .into_iter()
            .filter(CollectionKind::is_global)
            .collect();
        assert_eq!(globals.len(), 7);
        assert!(!CollectionKind::News.is_global());
        assert!(globals.contains(&CollectionKind::SchoolInfo));
    }

    #[test]
    fn test_lifecycle_collections() {
        assert!(CollectionKind::News.has_lifecycle());
        assert!(CollectionKind::Announcements.has_lifecycle());
        assert!(CollectionKind::Documents.has_lifecycle());
        assert!(!CollectionKind::Events.has_lifecycle());
        assert!(!CollectionKind::Users.has_lifecycle());

        assert_eq!(CollectionKind::Announcements.expiry_field(), Some("expiryDate"));
        assert_eq!(CollectionKind::Documents.expiry_field(), Some("validUntil"));
        assert_eq!(CollectionKind::News.expiry_field(), None);
    }

    #[test]
    fn test_slug_collections() {
        assert!(CollectionKind::News.has_slug());
        assert!(CollectionKind::Departments.has_slug());
        assert!(!CollectionKind::Announcements.has_slug());
        assert!(!CollectionKind::SchoolInfo.has_slug());
    }
}
