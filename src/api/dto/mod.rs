//! Request and response DTOs for the management API.

pub mod create_link;
pub mod health;
pub mod link;
pub mod update_link;

pub use create_link::CreateLinkRequest;
pub use health::HealthResponse;
pub use link::{LinkResponse, VisitResponse};
pub use update_link::UpdateLinkRequest;
