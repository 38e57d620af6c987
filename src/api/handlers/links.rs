//! Handlers for link management endpoints (list, create, read, update, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::{CreateLinkRequest, LinkResponse, UpdateLinkRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all links with their visit histories.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// Password hashes never appear in the response; see
/// [`LinkResponse`].
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails, 409 Conflict if an explicit
/// slug is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create_link(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Fetches a single link by slug.
///
/// # Endpoint
///
/// `GET /api/urls/{slug}`
///
/// # Errors
///
/// Returns 404 Not Found if the slug is unknown.
pub async fn get_link_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&slug).await?;

    Ok(Json(link.into()))
}

/// Replaces a link's target URL and visit cap; password changes are
/// tri-state (see [`UpdateLinkRequest`]).
///
/// # Endpoint
///
/// `PUT /api/urls/{slug}`
///
/// # Errors
///
/// Returns 404 Not Found if the slug is unknown, 400 Bad Request if
/// validation fails.
pub async fn update_link_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update_link(&slug, payload.into())
        .await?;

    Ok(Json(link.into()))
}

/// Deletes a link and all of its visit records.
///
/// # Endpoint
///
/// `DELETE /api/urls/{slug}`
///
/// # Errors
///
/// Returns 404 Not Found if the slug is unknown.
pub async fn delete_link_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&slug).await?;

    Ok(StatusCode::NO_CONTENT)
}
