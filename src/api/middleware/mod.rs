//! Middleware for the management API.

pub mod auth;
