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
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use quill_core::{Post, PostUpdate};
use quill_db::PostRepository;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::{CurrentAdmin, OptionalAdmin},
    error::AppError,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub include_unpublished: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category_id: Option<i64>,
    pub published: Option<bool>,
}

/// GET /posts
///
/// `search` takes precedence over `category` when both are supplied, and
/// empty parameter values count as absent. Drafts appear only when the
/// caller is an authenticated admin who asked for them.
pub async fn list_posts_handler(
    State(state): State<AppState>,
    OptionalAdmin(admin): OptionalAdmin,
    Query(params): Query<ListPostsQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let include_unpublished =
        params.include_unpublished.as_deref() == Some("true") && admin.is_some();

    let repo = PostRepository::new(state.db.clone());

    let posts = if let Some(term) = params.search.as_deref().filter(|s| !s.is_empty()) {
        repo.search(term, include_unpublished).await?
    } else if let Some(slug) = params.category.as_deref().filter(|s| !s.is_empty()) {
        repo.list_by_category_slug(slug, include_unpublished).await?
    } else {
        repo.list(include_unpublished).await?
    };

    Ok(Json(posts))
}

/// GET /posts/{slug}
pub async fn get_post_handler(
    State(state): State<AppState>,
    OptionalAdmin(admin): OptionalAdmin,
    Path(slug): Path<String>,
) -> Result<Json<Post>, AppError> {
    let repo = PostRepository::new(state.db.clone());
    let post = repo
        .find_by_slug(&slug, admin.is_some())
        .await?
        .ok_or_else(|| AppError::not_found("Post not found"))?;

    Ok(Json(post))
}

/// POST /posts
pub async fn create_post_handler(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let (title, slug, content) = match (body.title, body.slug, body.content) {
        (Some(title), Some(slug), Some(content))
            if !title.is_empty() && !slug.is_empty() && !content.is_empty() =>
        {
            (title, slug, content)
        }
        _ => {
            return Err(AppError::bad_request(
                "Title, slug, and content are required",
            ))
        }
    };

    let mut post = Post::new(title, slug, content);
    post.excerpt = body.excerpt;
    post.category_id = body.category_id;
    post.published = body.published.unwrap_or(false);

    post.is_valid().map_err(AppError::bad_request)?;

    let repo = PostRepository::new(state.db.clone());
    let created = repo.create(&post).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /posts/{id}
pub async fn update_post_handler(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
    Json(update): Json<PostUpdate>,
) -> Result<Json<Post>, AppError> {
    // The path segment doubles as slug (GET) and id (PUT/DELETE); a
    // non-numeric id can't match any post
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found("Post not found"))?;

    if let Some(slug) = update.slug.as_deref() {
        quill_core::utils::slug::validate_slug(slug).map_err(AppError::bad_request)?;
    }

    let repo = PostRepository::new(state.db.clone());
    let updated = repo.update(id, &update).await?;

    Ok(Json(updated))
}

/// DELETE /posts/{id}
pub async fn delete_post_handler(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found("Post not found"))?;

    let repo = PostRepository::new(state.db.clone());
    if !repo.delete(id).await? {
        return Err(AppError::not_found("Post not found"));
    }

    Ok(Json(json!({ "message": "Post deleted successfully" })))
}
