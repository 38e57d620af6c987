//! Link management service for the authenticated API.

use std::sync::Arc;

use serde_json::json;
use url::Url;

use crate::domain::entities::{LinkUpdate, NewLink, ShortLink};
use crate::domain::stores::LinkStore;
use crate::error::AppError;
use crate::utils::password::hash_password;
use crate::utils::slug::{DEFAULT_SLUG_LENGTH, generate_slug};

/// Input for creating a link.
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub target_url: String,
    /// Explicit slug; checked for availability before insert.
    pub slug: Option<String>,
    /// Length for an auto-generated slug. Defaults to 5.
    pub slug_length: Option<usize>,
    /// `0` = unlimited.
    pub allowed_visits: u32,
    /// Plaintext; hashed before it reaches the store. Empty means none.
    pub password: Option<String>,
}

/// Input for updating a link.
///
/// `password` is tri-state: `None` leaves the stored hash unchanged,
/// `Some(None)` clears it, `Some(Some(p))` re-hashes and replaces it.
#[derive(Debug, Clone)]
pub struct UpdateLink {
    pub target_url: String,
    pub allowed_visits: u32,
    pub password: Option<Option<String>>,
}

/// Service for creating, inspecting, and mutating short links.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Returns all links with their visit histories.
    ///
    /// Password hashes are still present on the returned entities; response
    /// DTOs strip them.
    pub async fn list_links(&self) -> Result<Vec<ShortLink>, AppError> {
        Ok(self.store.list_all().await?)
    }

    /// Retrieves a link by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has the slug.
    pub async fn get_link(&self, slug: &str) -> Result<ShortLink, AppError> {
        self.store.get(slug).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "slug": slug }))
        })
    }

    /// Creates a short link.
    ///
    /// An explicit slug is checked for availability first and rejected with
    /// [`AppError::Conflict`] when taken (best-effort; the store's insert is
    /// the authoritative check). Without one, a random slug of the requested
    /// length is generated, retrying on the off chance of a collision.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unparseable target URL or a
    /// malformed explicit slug, [`AppError::Conflict`] for a taken slug.
    pub async fn create_link(&self, request: CreateLink) -> Result<ShortLink, AppError> {
        validate_target_url(&request.target_url)?;

        let password_hash = match request.password.as_deref() {
            Some(password) if !password.is_empty() => Some(hash_password(password)?),
            _ => None,
        };

        let slug = if let Some(slug) = request.slug {
            validate_explicit_slug(&slug)?;

            if self.store.get(&slug).await?.is_some() {
                return Err(AppError::conflict(
                    "Slug already exists",
                    json!({ "slug": slug }),
                ));
            }

            slug
        } else {
            let length = request.slug_length.unwrap_or(DEFAULT_SLUG_LENGTH);
            self.generate_unique_slug(length).await?
        };

        let created = self
            .store
            .insert(NewLink {
                slug,
                target_url: request.target_url,
                password_hash,
                allowed_visits: request.allowed_visits,
            })
            .await?;

        Ok(created)
    }

    /// Replaces a link's target URL and visit cap, and applies the tri-state
    /// password change.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug is absent,
    /// [`AppError::Validation`] for a bad URL or an explicitly empty password.
    pub async fn update_link(&self, slug: &str, request: UpdateLink) -> Result<ShortLink, AppError> {
        validate_target_url(&request.target_url)?;

        let existing = self.get_link(slug).await?;

        let password_hash = match request.password {
            None => existing.password_hash,
            Some(None) => None,
            Some(Some(password)) => {
                if password.is_empty() {
                    return Err(AppError::bad_request(
                        "Password must not be empty; send null to remove it",
                        json!({}),
                    ));
                }
                Some(hash_password(&password)?)
            }
        };

        self.store
            .update(
                slug,
                LinkUpdate {
                    target_url: request.target_url,
                    password_hash,
                    allowed_visits: request.allowed_visits,
                },
            )
            .await?;

        self.get_link(slug).await
    }

    /// Deletes a link and all of its visit records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug is absent.
    pub async fn delete_link(&self, slug: &str) -> Result<(), AppError> {
        self.store.delete(slug).await.map_err(|e| match e {
            crate::error::StoreError::NotFound => {
                AppError::not_found("Short link not found", json!({ "slug": slug }))
            }
            other => other.into(),
        })
    }

    /// Generates a random slug that does not collide with a stored one.
    ///
    /// Attempts up to 10 times before failing.
    async fn generate_unique_slug(&self, length: usize) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let slug = generate_slug(length);

            if self.store.get(&slug).await?.is_none() {
                return Ok(slug);
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique slug",
            json!({ "reason": "too many collisions", "length": length }),
        ))
    }
}

fn validate_target_url(target_url: &str) -> Result<(), AppError> {
    Url::parse(target_url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;
    Ok(())
}

/// Slugs that would shadow the service's own routes.
const RESERVED_SLUGS: &[&str] = &["api", "health"];

fn validate_explicit_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() || slug.contains('/') {
        return Err(AppError::bad_request(
            "Slug must be non-empty and must not contain '/'",
            json!({ "slug": slug }),
        ));
    }

    if RESERVED_SLUGS.contains(&slug) {
        return Err(AppError::bad_request(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}
