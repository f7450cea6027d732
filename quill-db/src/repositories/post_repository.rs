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
use quill_core::{Post, PostCategory, PostUpdate};
use sqlx::SqlitePool;

use crate::error::{is_unique_violation, StoreError};

pub struct PostRepository {
    pool: SqlitePool,
}

type PostRow = (
    i64,            // id
    String,         // title
    String,         // slug
    String,         // content
    Option<String>, // excerpt
    Option<i64>,    // category_id
    bool,           // published
    String,         // created_at
    String,         // updated_at
);

type JoinedPostRow = (
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<i64>,
    bool,
    String,
    String,
    Option<i64>,    // category id (join)
    Option<String>, // category name (join)
    Option<String>, // category slug (join)
);

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a post and return the stored row.
    ///
    /// `INSERT ... RETURNING` keeps the read in the same statement, so a
    /// concurrent writer can never observe (or cause) a gap between insert
    /// and read-back. Slug collisions surface as `StoreError::Conflict`.
    pub async fn create(&self, post: &Post) -> Result<Post, StoreError> {
        let result = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO blog_posts (title, slug, content, excerpt, category_id, published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, title, slug, content, excerpt, category_id, published, created_at, updated_at
            "#,
        )
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(post.category_id)
        .bind(post.published)
        .bind(post.created_at.to_rfc3339())
        .bind(post.updated_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(post_from_row(row)?),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Conflict(
                "A post with this slug already exists".to_string(),
            )),
            Err(e) => Err(anyhow::Error::new(e)
                .context("Failed to create post")
                .into()),
        }
    }

    /// List posts, newest first. Drafts are included only when
    /// `include_unpublished` is set.
    pub async fn list(&self, include_unpublished: bool) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, JoinedPostRow>(
            r#"
            SELECT bp.id, bp.title, bp.slug, bp.content, bp.excerpt, bp.category_id, bp.published,
                   bp.created_at, bp.updated_at, c.id, c.name, c.slug
            FROM blog_posts bp
            LEFT JOIN categories c ON bp.category_id = c.id
            WHERE (bp.published = 1 OR ? = 1)
            ORDER BY bp.created_at DESC
            "#,
        )
        .bind(include_unpublished)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list posts")?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(post_from_joined_row(row)?);
        }
        Ok(posts)
    }

    /// List posts belonging to the category with the given slug.
    pub async fn list_by_category_slug(
        &self,
        category_slug: &str,
        include_unpublished: bool,
    ) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, JoinedPostRow>(
            r#"
            SELECT bp.id, bp.title, bp.slug, bp.content, bp.excerpt, bp.category_id, bp.published,
                   bp.created_at, bp.updated_at, c.id, c.name, c.slug
            FROM blog_posts bp
            LEFT JOIN categories c ON bp.category_id = c.id
            WHERE c.slug = ? AND (bp.published = 1 OR ? = 1)
            ORDER BY bp.created_at DESC
            "#,
        )
        .bind(category_slug)
        .bind(include_unpublished)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list posts by category")?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(post_from_joined_row(row)?);
        }
        Ok(posts)
    }

    /// Case-insensitive substring search over title and content.
    /// LIKE wildcards in the term are passed through as-is.
    pub async fn search(
        &self,
        term: &str,
        include_unpublished: bool,
    ) -> Result<Vec<Post>, StoreError> {
        let pattern = format!("%{}%", term);

        let rows = sqlx::query_as::<_, JoinedPostRow>(
            r#"
            SELECT bp.id, bp.title, bp.slug, bp.content, bp.excerpt, bp.category_id, bp.published,
                   bp.created_at, bp.updated_at, c.id, c.name, c.slug
            FROM blog_posts bp
            LEFT JOIN categories c ON bp.category_id = c.id
            WHERE (bp.title LIKE ? OR bp.content LIKE ?) AND (bp.published = 1 OR ? = 1)
            ORDER BY bp.created_at DESC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(include_unpublished)
        .fetch_all(&self.pool)
        .await
        .context("Failed to search posts")?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(post_from_joined_row(row)?);
        }
        Ok(posts)
    }

    pub async fn find_by_slug(
        &self,
        slug: &str,
        include_unpublished: bool,
    ) -> Result<Option<Post>, StoreError> {
        let result = sqlx::query_as::<_, JoinedPostRow>(
            r#"
            SELECT bp.id, bp.title, bp.slug, bp.content, bp.excerpt, bp.category_id, bp.published,
                   bp.created_at, bp.updated_at, c.id, c.name, c.slug
            FROM blog_posts bp
            LEFT JOIN categories c ON bp.category_id = c.id
            WHERE bp.slug = ? AND (bp.published = 1 OR ? = 1)
            "#,
        )
        .bind(slug)
        .bind(include_unpublished)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find post by slug")?;

        match result {
            Some(row) => Ok(Some(post_from_joined_row(row)?)),
            None => Ok(None),
        }
    }

    /// Apply a partial update and return the stored row.
    ///
    /// Unset fields keep their current value via COALESCE; `updated_at` is
    /// refreshed unconditionally, even for an empty update. An unknown id
    /// yields `StoreError::NotFound`.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Post, StoreError> {
        let result = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE blog_posts
            SET title = COALESCE(?, title),
                slug = COALESCE(?, slug),
                content = COALESCE(?, content),
                excerpt = COALESCE(?, excerpt),
                category_id = COALESCE(?, category_id),
                published = COALESCE(?, published),
                updated_at = ?
            WHERE id = ?
            RETURNING id, title, slug, content, excerpt, category_id, published, created_at, updated_at
            "#,
        )
        .bind(&update.title)
        .bind(&update.slug)
        .bind(&update.content)
        .bind(&update.excerpt)
        .bind(update.category_id)
        .bind(update.published)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => Ok(post_from_row(row)?),
            Ok(None) => Err(StoreError::NotFound { entity: "Post" }),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Conflict(
                "A post with this slug already exists".to_string(),
            )),
            Err(e) => Err(anyhow::Error::new(e)
                .context("Failed to update post")
                .into()),
        }
    }

    /// Delete a post. Returns whether a row existed.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete post")?;

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

fn post_from_row(row: PostRow) -> Result<Post> {
    let (id, title, slug, content, excerpt, category_id, published, created_at, updated_at) = row;

    Ok(Post {
        id: Some(id),
        title,
        slug,
        content,
        excerpt,
        category_id,
        published,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
        category: None,
    })
}

fn post_from_joined_row(row: JoinedPostRow) -> Result<Post> {
    let (
        id,
        title,
        slug,
        content,
        excerpt,
        category_id,
        published,
        created_at,
        updated_at,
        cat_id,
        cat_name,
        cat_slug,
    ) = row;

    // All three join columns resolve together or not at all
    let category = match (cat_id, cat_name, cat_slug) {
        (Some(id), Some(name), Some(slug)) => Some(PostCategory { id, name, slug }),
        _ => None,
    };

    Ok(Post {
        id: Some(id),
        title,
        slug,
        content,
        excerpt,
        category_id,
        published,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
        category,
    })
}
