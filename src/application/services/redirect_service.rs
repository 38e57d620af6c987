//! Redirect resolution for the public, unauthenticated path.

use std::sync::Arc;

use crate::domain::stores::LinkStore;
use crate::error::AppError;
use crate::utils::password::verify_password;

/// What the HTTP layer knows about an incoming redirect request.
#[derive(Debug, Clone)]
pub enum RedirectRequest {
    /// A plain GET of the short link. `referer` comes from the request header.
    Initial { referer: String },
    /// A password form submission. `referer` is the original referer carried
    /// through the form so the eventual visit record keeps it.
    Submit { password: String, referer: String },
}

impl RedirectRequest {
    fn referer(&self) -> &str {
        match self {
            RedirectRequest::Initial { referer } | RedirectRequest::Submit { referer, .. } => {
                referer
            }
        }
    }
}

/// Terminal outcome of resolving one redirect request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Redirect the client. Rendered as 301 with caching disabled.
    Redirect { target_url: String },
    /// No link has this slug.
    NotFound,
    /// The link's visit cap has been reached.
    Expired,
    /// Render the password prompt; no visit has been recorded.
    PasswordPrompt { incorrect: bool, referer: String },
}

/// Resolves public redirect requests against the store.
///
/// Decision flow per request: lookup, expiry check, optional password gate,
/// visit recording, redirect. A visit is only ever recorded on the request
/// that actually gets redirected, so password prompts and rejections leave
/// the count untouched.
pub struct RedirectService {
    store: Arc<dyn LinkStore>,
    strict_visit_accounting: bool,
}

impl RedirectService {
    /// Creates a new redirect service.
    ///
    /// With `strict_visit_accounting` set, a failure to record the visit
    /// fails the whole request; unset (the default configuration), the
    /// failure is logged and the client is redirected anyway.
    pub fn new(store: Arc<dyn LinkStore>, strict_visit_accounting: bool) -> Self {
        Self {
            store,
            strict_visit_accounting,
        }
    }

    /// Runs the redirect decision flow for one request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store fails; business
    /// rejections (unknown slug, exhausted cap, password prompt) are
    /// outcomes, not errors.
    pub async fn resolve(
        &self,
        slug: &str,
        request: RedirectRequest,
    ) -> Result<RedirectOutcome, AppError> {
        let Some(link) = self.store.get(slug).await? else {
            return Ok(RedirectOutcome::NotFound);
        };

        if link.is_exhausted() {
            return Ok(RedirectOutcome::Expired);
        }

        let referer = if link.has_password() {
            let hash = link.password_hash.as_deref().unwrap_or_default();
            match &request {
                RedirectRequest::Initial { referer } => {
                    return Ok(RedirectOutcome::PasswordPrompt {
                        incorrect: false,
                        referer: referer.clone(),
                    });
                }
                RedirectRequest::Submit { password, referer } => {
                    if !verify_password(password, hash) {
                        return Ok(RedirectOutcome::PasswordPrompt {
                            incorrect: true,
                            referer: referer.clone(),
                        });
                    }
                    referer.clone()
                }
            }
        } else {
            request.referer().to_string()
        };

        if let Err(e) = self.store.record_visit(slug, &referer).await {
            if self.strict_visit_accounting {
                return Err(e.into());
            }
            tracing::error!(error = %e, slug, "failed to record visit, redirecting anyway");
        }

        Ok(RedirectOutcome::Redirect {
            target_url: link.target_url,
        })
    }
}
