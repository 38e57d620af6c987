//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A stored short link with its visit history
//! - [`Visit`] - A single recorded redirect event
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for writes:
//! - `NewLink` - For inserting new links
//! - `LinkUpdate` - Full replacement of a link's mutable fields
//!
//! The serde layout of [`ShortLink`] doubles as the persisted JSON-file
//! format; API responses go through [`crate::api::dto`], which strips the
//! password field.

pub mod link;
pub mod visit;

pub use link::{LinkUpdate, NewLink, ShortLink};
pub use visit::Visit;
