//! Storage capability trait for short link data access.

use crate::domain::entities::{LinkUpdate, NewLink, ShortLink};
use crate::error::StoreError;
use async_trait::async_trait;

/// Uniform storage contract implemented by every backend.
///
/// All operations are one-shot: a failure is reported once and never retried
/// internally. Backends provide their own mutual exclusion where their update
/// strategy needs it (the JSON-file backend serializes whole-file rewrites);
/// callers get no cross-operation transaction guarantees.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonFileStore`] - flat JSON file
/// - [`crate::infrastructure::persistence::SqliteStore`] - embedded SQLite
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/store_json.rs`, `tests/store_sqlite.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Returns every stored link with its visit history attached.
    async fn list_all(&self) -> Result<Vec<ShortLink>, StoreError>;

    /// Finds a link by slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` if found
    /// - `Ok(None)` if no link has that slug (absence is not a failure)
    async fn get(&self, slug: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the slug already exists. Callers
    /// that accept user-chosen slugs additionally pre-check with [`Self::get`];
    /// that pre-check is best-effort, this is the authoritative rejection.
    async fn insert(&self, new_link: NewLink) -> Result<ShortLink, StoreError>;

    /// Replaces a link's target URL, password hash, and visit cap.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the slug does not exist at the
    /// time of the operation.
    async fn update(&self, slug: &str, update: LinkUpdate) -> Result<(), StoreError>;

    /// Removes a link and all of its visit records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the slug does not exist.
    async fn delete(&self, slug: &str) -> Result<(), StoreError>;

    /// Appends a visit with the given referer to a link's history.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the slug does not exist.
    async fn record_visit(&self, slug: &str, referer: &str) -> Result<(), StoreError>;
}
