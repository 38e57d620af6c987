//! DTO for the link update endpoint.

use serde::Deserialize;
use serde_with::serde_as;
use validator::Validate;

use crate::application::services::UpdateLink;

/// Request body for `PUT /api/urls/{slug}`.
///
/// The target URL and visit cap are replaced wholesale.
///
/// # `password` semantics
///
/// - **Absent** (`password` not in JSON) → leave the stored password unchanged
/// - **`null`** → remove the password gate
/// - **String** → re-hash and set the new password
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    /// New destination URL for this link.
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// New cap on successful redirects. 0 (the default) means unlimited.
    #[serde(default)]
    pub allowed_visits: u32,

    /// Password change. Absent = no change, null = clear, value = set.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub password: Option<Option<String>>,
}

impl From<UpdateLinkRequest> for UpdateLink {
    fn from(request: UpdateLinkRequest) -> Self {
        UpdateLink {
            target_url: request.url,
            allowed_visits: request.allowed_visits,
            password: request.password,
        }
    }
}
