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
use quill_core::AdminUser;
use sqlx::SqlitePool;

use crate::error::{is_unique_violation, StoreError};

pub struct AdminUserRepository {
    pool: SqlitePool,
}

type AdminUserRow = (i64, String, String, String);

impl AdminUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &AdminUser) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO admin_users (username, password_hash, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Conflict(
                "An admin user with this username already exists".to_string(),
            )),
            Err(e) => Err(anyhow::Error::new(e)
                .context("Failed to create admin user")
                .into()),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, StoreError> {
        let result = sqlx::query_as::<_, AdminUserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM admin_users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find admin user by username")?;

        match result {
            Some(row) => Ok(Some(admin_user_from_row(row)?)),
            None => Ok(None),
        }
    }

    /// List all admin users, oldest first.
    pub async fn list(&self) -> Result<Vec<AdminUser>, StoreError> {
        let rows = sqlx::query_as::<_, AdminUserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM admin_users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list admin users")?;

        let mut users = Vec::new();
        for row in rows {
            users.push(admin_user_from_row(row)?);
        }
        Ok(users)
    }

    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), StoreError> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE admin_users
            SET password_hash = ?
            WHERE id = ?
            "#,
        )
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update admin password")?
        .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::NotFound {
                entity: "Admin user",
            });
        }

        Ok(())
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

fn admin_user_from_row(row: AdminUserRow) -> Result<AdminUser> {
    let (id, username, password_hash, created_at) = row;

    Ok(AdminUser {
        id: Some(id),
        username,
        password_hash,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admin_users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    #[sqlx::test]
    async fn test_create_admin_user() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        setup_test_db(&pool).await?;

        let repo = AdminUserRepository::new(pool.clone());
        let user = AdminUser::new("admin".to_string(), "admin123")?;

        let id = repo.create(&user).await?;
        assert!(id > 0);

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await?;
        assert_eq!(count.0, 1);

        Ok(())
    }

    #[sqlx::test]
    async fn test_create_duplicate_username_fails() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        setup_test_db(&pool).await?;

        let repo = AdminUserRepository::new(pool.clone());
        repo.create(&AdminUser::new("admin".to_string(), "first")?)
            .await?;

        let result = repo
            .create(&AdminUser::new("admin".to_string(), "second")?)
            .await;

        match result {
            Err(StoreError::Conflict(msg)) => {
                assert_eq!(msg, "An admin user with this username already exists");
            }
            other => panic!("Expected Conflict, got {:?}", other),
        }

        Ok(())
    }

    #[sqlx::test]
    async fn test_find_by_username() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        setup_test_db(&pool).await?;

        let repo = AdminUserRepository::new(pool.clone());
        let user = AdminUser::new("admin".to_string(), "admin123")?;
        repo.create(&user).await?;

        let found = repo.find_by_username("admin").await?.expect("user exists");
        assert_eq!(found.username, "admin");
        assert!(found.verify_password("admin123")?);

        assert!(repo.find_by_username("ghost").await?.is_none());

        Ok(())
    }

    #[sqlx::test]
    async fn test_list_admin_users() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        setup_test_db(&pool).await?;

        let repo = AdminUserRepository::new(pool.clone());
        repo.create(&AdminUser::new("first".to_string(), "pw1")?)
            .await?;
        repo.create(&AdminUser::new("second".to_string(), "pw2")?)
            .await?;

        let users = repo.list().await?;
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);

        Ok(())
    }

    #[sqlx::test]
    async fn test_update_password() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        setup_test_db(&pool).await?;

        let repo = AdminUserRepository::new(pool.clone());
        let id = repo
            .create(&AdminUser::new("admin".to_string(), "old")?)
            .await?;

        let new_hash = AdminUser::hash_password("new")?;
        repo.update_password(id, &new_hash).await?;

        let user = repo.find_by_username("admin").await?.expect("user exists");
        assert!(user.verify_password("new")?);
        assert!(!user.verify_password("old")?);

        Ok(())
    }

    #[sqlx::test]
    async fn test_update_password_missing_user() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        setup_test_db(&pool).await?;

        let repo = AdminUserRepository::new(pool.clone());
        let result = repo.update_password(99, "hash").await;

        assert!(matches!(result, Err(StoreError::NotFound { .. })));

        Ok(())
    }
}
