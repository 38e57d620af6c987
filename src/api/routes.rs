//! Management API route configuration.
//!
//! All endpoints here require Bearer token authentication via
//! [`crate::api::middleware::auth`]; the layer is attached in
//! [`crate::routes::router`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    update_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All management routes, to be protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /urls`         - List links (passwords stripped)
/// - `POST   /urls`         - Create a link
/// - `GET    /urls/{slug}`  - Fetch a single link
/// - `PUT    /urls/{slug}`  - Replace URL / visit cap / password
/// - `DELETE /urls/{slug}`  - Delete a link and its visits
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_links_handler).post(create_link_handler))
        .route(
            "/urls/{slug}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
}
