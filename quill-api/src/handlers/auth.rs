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

use anyhow::Context;
use axum::{extract::State, Json};
use quill_db::AdminUserRepository;
use serde::{Deserialize, Serialize};

use crate::{auth::CurrentAdmin, error::AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: AuthUser,
}

/// POST /auth/login
///
/// Unknown usernames and wrong passwords get the same 401, so the response
/// can't be used to probe which admin accounts exist.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (username, password) = match (body.username, body.password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            (username, password)
        }
        _ => return Err(AppError::bad_request("Username and password are required")),
    };

    let repo = AdminUserRepository::new(state.db.clone());
    let user = match repo.find_by_username(&username).await? {
        Some(user) => user,
        None => {
            tracing::debug!("Login failed: unknown username");
            return Err(AppError::unauthorized("Invalid credentials"));
        }
    };

    if !user.verify_password(&password)? {
        tracing::debug!("Login failed: wrong password for {}", user.username);
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let id = user.id.context("Stored admin user has no id")?;
    let token = state.tokens.issue(id, &user.username)?;

    tracing::info!("Admin {} logged in", user.username);

    Ok(Json(LoginResponse {
        token,
        user: AuthUser {
            id,
            username: user.username,
        },
    }))
}

/// GET /auth/verify
pub async fn verify_handler(admin: CurrentAdmin) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        user: AuthUser {
            id: admin.id,
            username: admin.username,
        },
    })
}
