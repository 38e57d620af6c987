//! Random slug generation for auto-assigned short links.

use base64::Engine as _;

/// Slug length used when a create request does not ask for one.
pub const DEFAULT_SLUG_LENGTH: usize = 5;

/// Generates a random URL-safe slug of the requested length.
///
/// Draws `length * 2` bytes from the system CSPRNG, base64-encodes them,
/// truncates to `length` characters, and replaces `/` with `_` so the slug
/// stays path-safe.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_slug(length: usize) -> String {
    let mut buffer = vec![0u8; length * 2];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let encoded = base64::engine::general_purpose::STANDARD.encode(&buffer);
    encoded[..length].replace('/', "_")
}
