//! Infrastructure layer for persistence.
//!
//! Implements the storage contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - The interchangeable storage backends and their factory

pub mod persistence;
