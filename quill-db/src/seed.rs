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
use quill_core::{AdminUser, Category};
use sqlx::SqlitePool;

use crate::repositories::{AdminUserRepository, CategoryRepository};

/// Seed the default admin user and starter categories.
///
/// Both steps are guarded by count queries, so running this on every
/// startup is safe: a non-empty table is left exactly as it is.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<()> {
    seed_admin_user(pool).await?;
    seed_categories(pool).await?;
    Ok(())
}

async fn seed_admin_user(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
        .fetch_one(pool)
        .await
        .context("Failed to count admin users")?;

    if count > 0 {
        return Ok(());
    }

    let repo = AdminUserRepository::new(pool.clone());
    let user = AdminUser::new("admin".to_string(), "admin123")?;
    repo.create(&user).await?;

    tracing::info!("Created default admin user (username: admin)");
    tracing::warn!("The default admin password is in effect; change it with `quill admin password admin`");

    Ok(())
}

async fn seed_categories(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await
        .context("Failed to count categories")?;

    if count > 0 {
        return Ok(());
    }

    let defaults = [
        (
            "Technology",
            "technology",
            "Posts about technology and programming",
        ),
        ("Lifestyle", "lifestyle", "Lifestyle and personal posts"),
        ("Travel", "travel", "Travel experiences and guides"),
    ];

    let repo = CategoryRepository::new(pool.clone());
    for (name, slug, description) in defaults {
        let category = Category::new(
            name.to_string(),
            slug.to_string(),
            Some(description.to_string()),
        );
        repo.create(&category).await?;
    }

    tracing::info!("Seeded default categories");

    Ok(())
}
