// Quill - A personal blogging platform built with Rust
// Copyright (C) 2025 Quill Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::slug::validate_slug;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, slug: String, description: Option<String>) -> Self {
        Self {
            id: None,
            name,
            slug,
            description,
            created_at: Utc::now(),
        }
    }

    pub fn validate_name(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }

        if self.name.len() > 255 {
            return Err("Name cannot exceed 255 characters".to_string());
        }

        Ok(())
    }

    pub fn validate_slug(&self) -> Result<(), String> {
        validate_slug(&self.slug)
    }

    /// Validate all category fields
    pub fn is_valid(&self) -> Result<(), String> {
        self.validate_name()?;
        self.validate_slug()?;
        Ok(())
    }
}

/// Partial update for a category; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl CategoryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.slug.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new(
            "Technology".to_string(),
            "technology".to_string(),
            Some("Posts about technology".to_string()),
        );

        assert!(category.id.is_none());
        assert_eq!(category.name, "Technology");
        assert_eq!(category.slug, "technology");
        assert_eq!(
            category.description,
            Some("Posts about technology".to_string())
        );
    }

    #[test]
    fn test_new_category_without_description() {
        let category = Category::new("Travel".to_string(), "travel".to_string(), None);

        assert!(category.description.is_none());
        assert!(category.is_valid().is_ok());
    }

    #[test]
    fn test_validate_name_empty() {
        let category = Category::new("".to_string(), "slug".to_string(), None);
        let result = category.validate_name();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("empty"));
    }

    #[test]
    fn test_validate_name_whitespace_only() {
        let category = Category::new("   ".to_string(), "slug".to_string(), None);
        assert!(category.validate_name().is_err());
    }

    #[test]
    fn test_validate_name_too_long() {
        let category = Category::new("a".repeat(256), "slug".to_string(), None);
        let result = category.validate_name();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("exceed 255"));
    }

    #[test]
    fn test_validate_slug_invalid() {
        let category = Category::new("Tech".to_string(), "has space".to_string(), None);
        assert!(category.validate_slug().is_err());
    }

    #[test]
    fn test_update_is_empty() {
        assert!(CategoryUpdate::new().is_empty());
        assert!(!CategoryUpdate::new().name("Tech").is_empty());
    }

    #[test]
    fn test_update_builder() {
        let update = CategoryUpdate::new().name("Tech").slug("tech");

        assert_eq!(update.name, Some("Tech".to_string()));
        assert_eq!(update.slug, Some("tech".to_string()));
        assert!(update.description.is_none());
    }

    #[test]
    fn test_update_deserialize_missing_fields() {
        let update: CategoryUpdate = serde_json::from_str(r#"{"name": "Tech"}"#).unwrap();

        assert_eq!(update.name, Some("Tech".to_string()));
        assert!(update.slug.is_none());
        assert!(update.description.is_none());
    }
}
