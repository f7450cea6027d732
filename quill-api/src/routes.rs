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
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, AppState, Config};

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Health check
        .route("/health", get(health))
        // Authentication
        .route("/auth/login", post(handlers::login_handler))
        .route("/auth/verify", get(handlers::verify_handler))
        // Posts. The trailing segment is a slug for GET and a numeric id
        // for PUT and DELETE; the handlers sort that out.
        .route(
            "/posts",
            get(handlers::list_posts_handler).post(handlers::create_post_handler),
        )
        .route(
            "/posts/{slug}",
            get(handlers::get_post_handler)
                .put(handlers::update_post_handler)
                .delete(handlers::delete_post_handler),
        )
        // Categories
        .route(
            "/categories",
            get(handlers::list_categories_handler).post(handlers::create_category_handler),
        )
        .route(
            "/categories/{slug}",
            get(handlers::get_category_handler)
                .put(handlers::update_category_handler)
                .delete(handlers::delete_category_handler),
        )
        // Unknown routes get a JSON 404 (last, to catch all)
        .fallback(not_found)
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000"));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

// Health check handler
async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

// Catch-all handler for unknown routes
async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_health_endpoint() {
        let state = crate::test_helpers::create_test_app_state()
            .await
            .expect("Failed to create test state");

        let app = create_router(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server.get("/health").await;
        response.assert_status(StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["status"], "OK");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let state = crate::test_helpers::create_test_app_state()
            .await
            .expect("Failed to create test state");

        let app = create_router(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server.get("/does-not-exist").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["error"], "Route not found");
    }

    #[tokio::test]
    async fn test_public_listings_need_no_auth() {
        let state = crate::test_helpers::create_test_app_state()
            .await
            .expect("Failed to create test state");

        let app = create_router(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server.get("/posts").await;
        response.assert_status(StatusCode::OK);

        let response = server.get("/categories").await;
        response.assert_status(StatusCode::OK);
    }
}
