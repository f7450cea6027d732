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

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use quill_core::{Category, CategoryUpdate};
use sqlx::SqlitePool;

use crate::error::{is_unique_violation, StoreError};

pub struct CategoryRepository {
    pool: SqlitePool,
}

type CategoryRow = (i64, String, String, Option<String>, String);

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a category and return the stored row.
    pub async fn create(&self, category: &Category) -> Result<Category, StoreError> {
        let result = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, slug, description, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, slug, description, created_at
            "#,
        )
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(category.created_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(category_from_row(row)?),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Conflict(
                "A category with this name or slug already exists".to_string(),
            )),
            Err(e) => Err(anyhow::Error::new(e)
                .context("Failed to create category")
                .into()),
        }
    }

    /// List all categories, ordered by name.
    pub async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, description, created_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list categories")?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(category_from_row(row)?);
        }
        Ok(categories)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let result = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, description, created_at
            FROM categories
            WHERE slug = ?
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find category by slug")?;

        match result {
            Some(row) => Ok(Some(category_from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Apply a partial update and return the stored row. Unset fields keep
    /// their current value; an unknown id yields `StoreError::NotFound`.
    pub async fn update(&self, id: i64, update: &CategoryUpdate) -> Result<Category, StoreError> {
        let result = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = COALESCE(?, name),
                slug = COALESCE(?, slug),
                description = COALESCE(?, description)
            WHERE id = ?
            RETURNING id, name, slug, description, created_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.slug)
        .bind(&update.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => Ok(category_from_row(row)?),
            Ok(None) => Err(StoreError::NotFound {
                entity: "Category",
            }),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Conflict(
                "A category with this name or slug already exists".to_string(),
            )),
            Err(e) => Err(anyhow::Error::new(e)
                .context("Failed to update category")
                .into()),
        }
    }

    /// Delete a category. Returns whether a row existed.
    ///
    /// Posts referencing the category are deliberately left alone; their
    /// category_id dangles and reads treat them as uncategorized.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete category")?;

        Ok(result.rows_affected() > 0)
    }
}

// SQLite stores datetime as "YYYY-MM-DD HH:MM:SS" or ISO8601
fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    if value.contains('T') {
        Ok(DateTime::parse_from_rfc3339(value)
            .with_context(|| format!("Failed to parse {} as RFC3339", field))?
            .with_timezone(&Utc))
    } else {
        Ok(
            chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .with_context(|| format!("Failed to parse {} as SQLite format", field))?
                .and_utc(),
        )
    }
}

fn category_from_row(row: CategoryRow) -> Result<Category> {
    let (id, name, slug, description, created_at) = row;

    Ok(Category {
        id: Some(id),
        name,
        slug,
        description,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}
