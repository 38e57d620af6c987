//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! - `API_TOKEN` - Bearer token for the management API
//! - `TOKEN_SIGNING_SECRET` - HMAC key used to hash tokens before comparison
//!
//! ## Optional Variables
//!
//! - `STORE_TYPE` - Storage backend: `json` or `sqlite` (default: `json`)
//! - `JSON_STORE_PATH` - JSON file location (default: `urls.json`)
//! - `SQLITE_STORE_PATH` - SQLite database location (default: `urls.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `STRICT_VISIT_ACCOUNTING` - When `true`, a failed visit record fails the
//!   redirect instead of being logged and ignored (default: `false`)

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend key handed to the store factory.
    pub store_type: String,
    pub json_store_path: String,
    pub sqlite_store_path: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Bearer token accepted by the management API.
    pub api_token: String,
    /// HMAC signing secret used to hash API tokens before comparison.
    pub token_signing_secret: String,
    /// When true, a visit-recording failure fails the whole redirect request.
    /// When false, the failure is logged and the client is redirected anyway.
    pub strict_visit_accounting: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing.
    pub fn from_env() -> Result<Self> {
        let store_type = env::var("STORE_TYPE").unwrap_or_else(|_| "json".to_string());
        let json_store_path =
            env::var("JSON_STORE_PATH").unwrap_or_else(|_| "urls.json".to_string());
        let sqlite_store_path =
            env::var("SQLITE_STORE_PATH").unwrap_or_else(|_| "urls.db".to_string());

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let api_token = env::var("API_TOKEN").context("API_TOKEN must be set")?;
        let token_signing_secret =
            env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

        let strict_visit_accounting = env::var("STRICT_VISIT_ACCOUNTING")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            store_type,
            json_store_path,
            sqlite_store_path,
            listen_addr,
            log_level,
            log_format,
            api_token,
            token_signing_secret,
            strict_visit_accounting,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - a secret or store path is empty
    ///
    /// The store type itself is validated by the factory, which is the one
    /// place that knows the available backends.
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.api_token.is_empty() {
            anyhow::bail!("API_TOKEN must not be empty");
        }

        if self.token_signing_secret.is_empty() {
            anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
        }

        if self.json_store_path.is_empty() || self.sqlite_store_path.is_empty() {
            anyhow::bail!("store paths must not be empty");
        }

        Ok(())
    }

    /// Prints a configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Store type: {}", self.store_type);
        match self.store_type.as_str() {
            "json" => tracing::info!("  Store path: {}", self.json_store_path),
            "sqlite" => tracing::info!("  Store path: {}", self.sqlite_store_path),
            _ => {}
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Strict visit accounting: {}",
            self.strict_visit_accounting
        );
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
