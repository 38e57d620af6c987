//! Handlers for the public redirect path.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::application::services::{RedirectOutcome, RedirectRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Password prompt page, rendered for protected links.
///
/// Carries the original referer through the form so the visit that is
/// eventually recorded keeps it.
#[derive(Template)]
#[template(path = "password.html")]
struct PasswordPromptTemplate {
    incorrect: bool,
    referer: String,
}

/// Form body posted by the password prompt.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub password: String,
    #[serde(default)]
    pub referer: String,
}

/// Redirects a slug to its target URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Responses
///
/// - **301 Moved Permanently** with caching disabled - normal redirect
/// - **200 OK** - password prompt page for protected links (no visit recorded)
/// - **403 Forbidden** - the link's visit cap is exhausted
/// - **404 Not Found** - unknown slug
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let referer = referer_header(&headers);

    let outcome = state
        .redirect_service
        .resolve(&slug, RedirectRequest::Initial { referer })
        .await?;

    Ok(render_outcome(outcome))
}

/// Accepts the password form for a protected link.
///
/// # Endpoint
///
/// `POST /{slug}`
///
/// A correct password redirects (recording the visit with the carried
/// referer); a wrong one re-renders the prompt flagged as incorrect, so the
/// client may retry. Posting to an unprotected link behaves like a GET.
pub async fn submit_password_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    Form(form): Form<PasswordForm>,
) -> Result<Response, AppError> {
    let outcome = state
        .redirect_service
        .resolve(
            &slug,
            RedirectRequest::Submit {
                password: form.password,
                referer: form.referer,
            },
        )
        .await?;

    Ok(render_outcome(outcome))
}

fn referer_header(headers: &HeaderMap) -> String {
    headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn render_outcome(outcome: RedirectOutcome) -> Response {
    match outcome {
        RedirectOutcome::Redirect { target_url } => (
            // 301, but with caching disabled: shared caches must not replay
            // a counted, possibly gated redirect.
            StatusCode::MOVED_PERMANENTLY,
            [
                (header::LOCATION, target_url.as_str()),
                (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            ],
        )
            .into_response(),
        RedirectOutcome::NotFound => {
            (StatusCode::NOT_FOUND, "Unknown short link").into_response()
        }
        RedirectOutcome::Expired => (StatusCode::FORBIDDEN, "Short link expired").into_response(),
        RedirectOutcome::PasswordPrompt { incorrect, referer } => {
            let template = PasswordPromptTemplate { incorrect, referer };
            match template.render() {
                Ok(html) => Html(html).into_response(),
                Err(e) => {
                    tracing::error!(error = %e, "failed to render password prompt");
                    AppError::internal("Failed to render page", json!({})).into_response()
                }
            }
        }
    }
}
