//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::HealthResponse;
use crate::state::AppState;

/// Returns service health with a storage reachability check.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: storage backend answered
/// - **503 Service Unavailable**: storage backend failed
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    // Any slug works as a probe; only the store's ability to answer matters.
    match state.store.get("health-probe").await {
        Ok(_) => Ok(Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION"),
            store: "ok".to_string(),
        })),
        Err(e) => {
            tracing::error!(error = %e, "health check: store unreachable");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    version: env!("CARGO_PKG_VERSION"),
                    store: "unreachable".to_string(),
                }),
            ))
        }
    }
}
