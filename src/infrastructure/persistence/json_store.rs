//! Flat-file JSON implementation of the link store.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::entities::{LinkUpdate, NewLink, ShortLink, Visit};
use crate::domain::stores::LinkStore;
use crate::error::StoreError;

/// Link store backed by a single JSON file.
///
/// The file holds the full array of links, each embedding its visit list.
/// Every operation decodes the whole array, mutates it in memory, and
/// rewrites the file from offset zero; there are no partial updates. A
/// per-store mutex serializes operations so two concurrent whole-file
/// rewrites cannot discard each other's changes; reads take the same lock so
/// they never observe a half-written file.
///
/// On first use against a missing file the store writes an empty array, so
/// initialization is idempotent and a read-only first operation works.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store over the given file path.
    ///
    /// The file is not touched until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Reads and decodes the whole collection, initializing a missing file
    /// with an empty array.
    ///
    /// Callers must hold the store lock.
    async fn load(&self) -> Result<Vec<ShortLink>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::write(&self.path, b"[]").await?;
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Re-encodes the collection and overwrites the file, truncating first.
    ///
    /// Callers must hold the store lock.
    async fn save(&self, links: &[ShortLink]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(links).map_err(io::Error::from)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl LinkStore for JsonFileStore {
    async fn list_all(&self) -> Result<Vec<ShortLink>, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn get(&self, slug: &str) -> Result<Option<ShortLink>, StoreError> {
        let _guard = self.lock.lock().await;
        let links = self.load().await?;
        Ok(links.into_iter().find(|link| link.slug == slug))
    }

    async fn insert(&self, new_link: NewLink) -> Result<ShortLink, StoreError> {
        let _guard = self.lock.lock().await;
        let mut links = self.load().await?;

        if links.iter().any(|link| link.slug == new_link.slug) {
            return Err(StoreError::Conflict);
        }

        let link = ShortLink::from_new(new_link);
        links.push(link.clone());
        self.save(&links).await?;

        Ok(link)
    }

    async fn update(&self, slug: &str, update: LinkUpdate) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut links = self.load().await?;

        let link = links
            .iter_mut()
            .find(|link| link.slug == slug)
            .ok_or(StoreError::NotFound)?;
        link.apply_update(update);

        self.save(&links).await
    }

    async fn delete(&self, slug: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut links = self.load().await?;

        let before = links.len();
        links.retain(|link| link.slug != slug);
        if links.len() == before {
            return Err(StoreError::NotFound);
        }

        // Visits are embedded in the link object, so removing the link is
        // already the cascading delete.
        self.save(&links).await
    }

    async fn record_visit(&self, slug: &str, referer: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut links = self.load().await?;

        let link = links
            .iter_mut()
            .find(|link| link.slug == slug)
            .ok_or(StoreError::NotFound)?;
        link.visits.push(Visit::new(referer));

        self.save(&links).await
    }
}
