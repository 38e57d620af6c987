//! DTO for the link creation endpoint.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::CreateLink;

/// Request body for `POST /api/urls`.
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "slug": "docs",            // optional, explicit slug
///   "slug_length": 8,          // optional, for auto-generation (default 5)
///   "allowed_visits": 10,      // optional, 0 = unlimited
///   "password": "hunter2"      // optional, stored hashed
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination to redirect to.
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Explicit slug. When set, creation fails with 409 if it is taken.
    pub slug: Option<String>,

    /// Length of the auto-generated slug when no explicit slug is given.
    #[validate(range(min = 1, max = 64, message = "slug_length must be 1-64"))]
    pub slug_length: Option<usize>,

    /// Cap on successful redirects. 0 (the default) means unlimited.
    #[serde(default)]
    pub allowed_visits: u32,

    /// Plaintext password protecting the link. Empty means none.
    pub password: Option<String>,
}

impl From<CreateLinkRequest> for CreateLink {
    fn from(request: CreateLinkRequest) -> Self {
        CreateLink {
            target_url: request.url,
            slug: request.slug,
            slug_length: request.slug_length,
            allowed_visits: request.allowed_visits,
            password: request.password,
        }
    }
}
