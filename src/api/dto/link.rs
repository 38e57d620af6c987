//! Outward-facing link representation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ShortLink;

/// JSON representation of a visit in API responses.
#[derive(Debug, Serialize)]
pub struct VisitResponse {
    pub referer: String,
}

/// JSON representation of a link in API responses.
///
/// This is the only shape links leave the service in; it deliberately has no
/// password field, so a stored hash can never end up in a response body.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub slug: String,
    pub url: String,
    pub date_created: DateTime<Utc>,
    pub allowed_visits: u32,
    pub visit_count: usize,
    pub visits: Vec<VisitResponse>,
}

impl From<ShortLink> for LinkResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            slug: link.slug,
            url: link.target_url,
            date_created: link.date_created,
            allowed_visits: link.allowed_visits,
            visit_count: link.visits.len(),
            visits: link
                .visits
                .into_iter()
                .map(|visit| VisitResponse {
                    referer: visit.referer,
                })
                .collect(),
        }
    }
}
