//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{slug}`   - Short link redirect (public)
//! - `POST /{slug}`   - Password form submission for protected links (public)
//! - `GET  /health`   - Health check (public)
//! - `/api/*`         - Management REST API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on the `/api` subtree
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, submit_password_handler};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// Constructs the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .route(
            "/{slug}",
            get(redirect_handler).post(submit_password_handler),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// [`router`] wrapped with trailing-slash normalization, as served by
/// [`crate::server::run`].
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
