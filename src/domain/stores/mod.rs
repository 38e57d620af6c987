//! Storage capability trait for the domain layer.
//!
//! [`LinkStore`] is the single contract every backend satisfies. Concrete
//! implementations live in `crate::infrastructure::persistence`; mock
//! implementations are auto-generated via `mockall` for testing.

pub mod link_store;

pub use link_store::LinkStore;

#[cfg(test)]
pub use link_store::MockLinkStore;
