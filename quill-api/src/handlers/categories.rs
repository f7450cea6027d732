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
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use quill_core::{Category, CategoryUpdate};
use quill_db::CategoryRepository;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{auth::CurrentAdmin, error::AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// GET /categories
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.list().await?;

    Ok(Json(categories))
}

/// GET /categories/{slug}
pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>, AppError> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Category not found"))?;

    Ok(Json(category))
}

/// POST /categories
pub async fn create_category_handler(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let (name, slug) = match (body.name, body.slug) {
        (Some(name), Some(slug)) if !name.is_empty() && !slug.is_empty() => (name, slug),
        _ => return Err(AppError::bad_request("Name and slug are required")),
    };

    let category = Category::new(name, slug, body.description);
    category.is_valid().map_err(AppError::bad_request)?;

    let repo = CategoryRepository::new(state.db.clone());
    let created = repo.create(&category).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /categories/{id}
pub async fn update_category_handler(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
    Json(update): Json<CategoryUpdate>,
) -> Result<Json<Category>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found("Category not found"))?;

    if let Some(slug) = update.slug.as_deref() {
        quill_core::utils::slug::validate_slug(slug).map_err(AppError::bad_request)?;
    }

    let repo = CategoryRepository::new(state.db.clone());
    let updated = repo.update(id, &update).await?;

    Ok(Json(updated))
}

/// DELETE /categories/{id}
///
/// Posts in the category are left in place; they read back as
/// uncategorized from then on.
pub async fn delete_category_handler(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found("Category not found"))?;

    let repo = CategoryRepository::new(state.db.clone());
    if !repo.delete(id).await? {
        return Err(AppError::not_found("Category not found"));
    }

    Ok(Json(json!({ "message": "Category deleted successfully" })))
}
