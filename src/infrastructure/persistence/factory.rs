//! Backend selection by configuration.

use std::sync::Arc;

use anyhow::{Result, bail};

use crate::config::Config;
use crate::domain::stores::LinkStore;
use crate::infrastructure::persistence::{JsonFileStore, SqliteStore};

/// Builds the storage backend named by `STORE_TYPE`.
///
/// Stateless selection: safe to call repeatedly and concurrently, though the
/// server calls it exactly once at startup and passes the resulting handle
/// down.
///
/// # Errors
///
/// Fails for an unknown store type, or when the SQLite backend cannot open
/// its database.
pub async fn create_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    match config.store_type.as_str() {
        "json" => Ok(Arc::new(JsonFileStore::new(&config.json_store_path))),
        "sqlite" => Ok(Arc::new(SqliteStore::connect(&config.sqlite_store_path).await?)),
        other => bail!("unknown store type '{other}' (expected \"json\" or \"sqlite\")"),
    }
}
