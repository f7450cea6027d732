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

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeader,
};
use std::convert::Infallible;

use crate::{error::AppError, AppState};

/// Authenticated admin, extracted from the Authorization header.
///
/// A missing header and a bad token are distinct failures: the first is
/// 401 (the caller never presented credentials), the second 403 (they
/// presented credentials that don't hold up).
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: i64,
    pub username: String,
}

impl<S> FromRequestParts<S> for CurrentAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::unauthorized("No token provided"))?;

        let state = AppState::from_ref(state);
        let claims = state.tokens.verify(bearer.token()).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            AppError::forbidden("Invalid token")
        })?;

        Ok(CurrentAdmin {
            id: claims.id,
            username: claims.username,
        })
    }
}

/// Admin status for endpoints that serve both visitors and admins.
///
/// Never rejects: an absent or invalid token reads as anonymous, and the
/// handler falls back to the public view.
#[derive(Debug, Clone)]
pub struct OptionalAdmin(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match CurrentAdmin::from_request_parts(parts, state).await {
            Ok(admin) => Ok(OptionalAdmin(Some(admin))),
            Err(_) => Ok(OptionalAdmin(None)),
        }
    }
}
