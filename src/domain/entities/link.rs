//! Short link entity shared by every storage backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Visit;

/// A stored short link with its recorded visit history.
///
/// The serde representation is also the on-disk layout of the JSON-file
/// backend, which is why `password` is serialized here: the persisted file
/// keeps the hash, and only the API response DTOs strip it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortLink {
    pub slug: String,
    #[serde(rename = "url")]
    pub target_url: String,
    pub date_created: DateTime<Utc>,
    /// `0` means unlimited; a positive value caps successful redirects.
    #[serde(default)]
    pub allowed_visits: u32,
    #[serde(default)]
    pub visits: Vec<Visit>,
    /// Opaque secret-verification value. `None` means no password gate.
    #[serde(rename = "password", default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl ShortLink {
    /// Materializes a new link from an insert payload.
    ///
    /// `date_created` is set here, once; it is immutable afterwards.
    pub fn from_new(new: NewLink) -> Self {
        Self {
            slug: new.slug,
            target_url: new.target_url,
            date_created: Utc::now(),
            allowed_visits: new.allowed_visits,
            visits: Vec::new(),
            password_hash: new.password_hash,
        }
    }

    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }

    /// Returns true when the visit cap has been reached.
    ///
    /// Enforcement happens in the redirect resolver, before granting a
    /// redirect; the data model itself never rejects further visits.
    pub fn is_exhausted(&self) -> bool {
        self.allowed_visits > 0 && self.visits.len() >= self.allowed_visits as usize
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }

    /// Applies a full-replacement update to the mutable fields.
    ///
    /// `slug`, `date_created` and the visit history are never touched.
    pub fn apply_update(&mut self, update: LinkUpdate) {
        self.target_url = update.target_url;
        self.allowed_visits = update.allowed_visits;
        self.password_hash = update.password_hash;
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub slug: String,
    pub target_url: String,
    pub password_hash: Option<String>,
    pub allowed_visits: u32,
}

/// Full replacement of a link's mutable fields.
///
/// Tri-state password semantics (keep / clear / replace) are resolved by the
/// application layer before this struct is built; at the store level the
/// update is unconditional.
#[derive(Debug, Clone)]
pub struct LinkUpdate {
    pub target_url: String,
    pub password_hash: Option<String>,
    pub allowed_visits: u32,
}
