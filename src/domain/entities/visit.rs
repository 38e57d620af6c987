//! Visit entity representing a single redirect event.

use serde::{Deserialize, Serialize};

/// One successful redirect through a short link.
///
/// A visit has no identity of its own; its position within the owning
/// [`super::ShortLink`]'s visit sequence (insertion order = chronological
/// order) is the only ordering that matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// HTTP referer of the request that triggered this visit. May be empty.
    #[serde(default)]
    pub referer: String,
}

impl Visit {
    pub fn new(referer: impl Into<String>) -> Self {
        Self {
            referer: referer.into(),
        }
    }
}
