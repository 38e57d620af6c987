//! SQLite implementation of the link store.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::domain::entities::{LinkUpdate, NewLink, ShortLink, Visit};
use crate::domain::stores::LinkStore;
use crate::error::StoreError;

/// Idempotent schema setup, applied on every connect.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS links (
        slug TEXT PRIMARY KEY,
        url TEXT NOT NULL,
        date_created TEXT NOT NULL,
        allowed_visits INTEGER NOT NULL DEFAULT 0,
        password TEXT
    )",
    "CREATE TABLE IF NOT EXISTS visits (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        slug TEXT NOT NULL,
        referer TEXT NOT NULL DEFAULT ''
    )",
];

/// Link store backed by an embedded SQLite database.
///
/// The connection pool is owned by the store and acquired once at startup.
/// Visits reference links by slug value; there is no enforced foreign key,
/// so [`LinkStore::delete`] performs the referential cleanup itself inside a
/// transaction.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if missing) the database at `path` and applies the
    /// schema.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Direct access to the underlying pool, mainly for tests that need to
    /// inspect table contents.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn link_from_row(row: &SqliteRow) -> Result<ShortLink, StoreError> {
        Ok(ShortLink {
            slug: row.try_get("slug")?,
            target_url: row.try_get("url")?,
            date_created: row.try_get::<DateTime<Utc>, _>("date_created")?,
            allowed_visits: row.try_get::<i64, _>("allowed_visits")? as u32,
            visits: Vec::new(),
            password_hash: row.try_get("password")?,
        })
    }

    /// Hydrates a link's visit sequence, ordered by insertion.
    async fn load_visits(&self, slug: &str) -> Result<Vec<Visit>, StoreError> {
        let rows = sqlx::query("SELECT referer FROM visits WHERE slug = ? ORDER BY id")
            .bind(slug)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| Ok(Visit::new(row.try_get::<String, _>("referer")?)))
            .collect()
    }
}

#[async_trait]
impl LinkStore for SqliteStore {
    async fn list_all(&self) -> Result<Vec<ShortLink>, StoreError> {
        let rows = sqlx::query(
            "SELECT slug, url, date_created, allowed_visits, password FROM links ORDER BY date_created",
        )
        .fetch_all(&self.pool)
        .await?;

        // One visits query per link; link counts stay small enough that the
        // N+1 pattern beats carrying a join + group-by here.
        let mut links = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut link = Self::link_from_row(row)?;
            link.visits = self.load_visits(&link.slug).await?;
            links.push(link);
        }

        Ok(links)
    }

    async fn get(&self, slug: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query(
            "SELECT slug, url, date_created, allowed_visits, password FROM links WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut link = Self::link_from_row(&row)?;
                link.visits = self.load_visits(&link.slug).await?;
                Ok(Some(link))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, new_link: NewLink) -> Result<ShortLink, StoreError> {
        let link = ShortLink::from_new(new_link);

        sqlx::query(
            "INSERT INTO links (slug, url, date_created, allowed_visits, password)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&link.slug)
        .bind(&link.target_url)
        .bind(link.date_created)
        .bind(link.allowed_visits as i64)
        .bind(&link.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                StoreError::Conflict
            } else {
                e.into()
            }
        })?;

        Ok(link)
    }

    async fn update(&self, slug: &str, update: LinkUpdate) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE links SET url = ?, password = ?, allowed_visits = ? WHERE slug = ?",
        )
        .bind(&update.target_url)
        .bind(&update.password_hash)
        .bind(update.allowed_visits as i64)
        .bind(slug)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, slug: &str) -> Result<(), StoreError> {
        // The link row and its visit rows must disappear as one unit; a
        // failure after the first DELETE rolls back on drop.
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM links WHERE slug = ?")
            .bind(slug)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        sqlx::query("DELETE FROM visits WHERE slug = ?")
            .bind(slug)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn record_visit(&self, slug: &str, referer: &str) -> Result<(), StoreError> {
        // INSERT..SELECT keeps this a single statement while still rejecting
        // unknown slugs: no matching link row means zero rows inserted.
        let result =
            sqlx::query("INSERT INTO visits (slug, referer) SELECT slug, ? FROM links WHERE slug = ?")
                .bind(referer)
                .bind(slug)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
