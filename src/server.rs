//! HTTP server initialization and runtime setup.
//!
//! Wires the selected storage backend into the services, builds the router,
//! and drives the Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;

use crate::application::services::{AuthService, LinkService, RedirectService};
use crate::config::Config;
use crate::infrastructure::persistence::create_store;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The storage backend selected by `STORE_TYPE`
/// - Link, redirect, and auth services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be constructed (unknown type, unreachable database)
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = create_store(&config).await?;
    tracing::info!(backend = %config.store_type, "Store initialized");

    let link_service = Arc::new(LinkService::new(store.clone()));
    let redirect_service = Arc::new(RedirectService::new(
        store.clone(),
        config.strict_visit_accounting,
    ));
    let auth_service = Arc::new(AuthService::new(
        &config.api_token,
        config.token_signing_secret.clone(),
    ));

    let state = AppState {
        store,
        link_service,
        redirect_service,
        auth_service,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
