//! URL slugs
//!
//! Slugs are derived from titles: lowercase ASCII letters and digits, with
//! every other run of characters collapsed into one hyphen. Uniqueness is the
//! store's job; this module only produces the candidate.

use crate::error::SlugError;

/// Normalize arbitrary text into a URL slug.
///
/// # Errors
///
/// Returns [`SlugError::EmptyResult`] when the input contains no ASCII
/// letters or digits.
///
/// # Examples
///
/// ```
/// use campus_content::slug::normalize;
///
/// assert_eq!(normalize("Hello, World!!").unwrap(), "hello-world");
/// assert_eq!(normalize("  Jurusan TKJ 2024 ").unwrap(), "jurusan-tkj-2024");
/// assert!(normalize("  ---  ").is_err());
/// ```
pub fn normalize(input: &str) -> Result<String, SlugError> {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        return Err(SlugError::EmptyResult);
    }
    Ok(slug)
}
