//! # Snaplink
//!
//! A small self-hosted URL shortener with pluggable storage backends.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities and the storage capability trait
//! - **Application Layer** ([`application`]) - Redirect resolution and link management
//! - **Infrastructure Layer** ([`infrastructure`]) - The JSON-file and SQLite backends
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Two interchangeable storage backends (flat JSON file or embedded SQLite)
//!   selected by configuration
//! - Per-visit statistics with referer tracking
//! - Optional per-link passwords and visit caps
//! - Bearer-token protected management API, public redirect endpoint
//!
//! ## Quick Start
//!
//! ```bash
//! export API_TOKEN="change-me"
//! export TOKEN_SIGNING_SECRET="also-change-me"
//! export STORE_TYPE="json"          # or "sqlite"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, StoreError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LinkService, RedirectService};
    pub use crate::domain::entities::{NewLink, ShortLink, Visit};
    pub use crate::domain::stores::LinkStore;
    pub use crate::error::{AppError, StoreError};
    pub use crate::state::AppState;
}
