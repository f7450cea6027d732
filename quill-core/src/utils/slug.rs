use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("Failed to compile slug regex"));

/// Validate a client-supplied slug.
///
/// Slugs are used as URL path segments; slashes and spaces are rejected.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("Slug cannot be empty".to_string());
    }

    if slug.len() > 255 {
        return Err("Slug cannot exceed 255 characters".to_string());
    }

    if !SLUG_REGEX.is_match(slug) {
        return Err(
            "Slug can only contain letters, numbers, hyphens, underscores, and dots".to_string(),
        );
    }

    Ok(())
}
