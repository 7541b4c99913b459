//! SQLite-backed image registry.

use crate::error::{RegistryError, RegistryResult};
use crate::store::ImageStore;
use crate::types::{normalize_name, validate_url, Image};
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS images (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        url     TEXT NOT NULL,
        name    TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_images_name ON images(name);
";

/// How long a call may wait for the connection and for SQLite locks.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Image registry stored in a single SQLite database file.
///
/// rusqlite connections are blocking, so every call runs on the tokio blocking
/// pool while holding the connection mutex. A call that cannot start its
/// statements within the busy timeout fails instead of running late.
#[derive(Clone)]
pub struct SqliteImageStore {
    conn: Arc<Mutex<Connection>>,
    busy_timeout: Duration,
}

impl SqliteImageStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!("Image registry opened at {}", path.display());
        Self::from_connection(conn)
    }

    /// Private in-memory database. Contents are lost when the store is dropped.
    pub fn open_in_memory() -> RegistryResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Bound the time a call may spend queued behind other callers or
    /// waiting on locks held by other connections (e.g. the admin CLI).
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    fn from_connection(conn: Connection) -> RegistryResult<Self> {
        conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> RegistryResult<T>
    where
        F: FnOnce(&Connection) -> RegistryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        let budget = self.busy_timeout;
        let queued_at = Instant::now();

        tokio::task::spawn_blocking(move || {
            let guard = conn
                .try_lock_for(budget)
                .ok_or(RegistryError::Busy(budget))?;

            // SQLite lock waits get whatever is left of the budget
            let remaining = budget
                .checked_sub(queued_at.elapsed())
                .filter(|left| !left.is_zero())
                .ok_or(RegistryError::Busy(budget))?;
            guard.busy_timeout(remaining)?;

            f(&guard)
        })
        .await?
    }
}

fn row_to_image(row: &Row<'_>) -> rusqlite::Result<Image> {
    Ok(Image {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
    })
}

#[async_trait]
impl ImageStore for SqliteImageStore {
    #[instrument(skip(self))]
    async fn insert(&self, name: Option<&str>, url: &str) -> RegistryResult<i64> {
        validate_url(url)?;
        let name = normalize_name(name);
        let url = url.trim().to_string();

        let id = self
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO images (url, name) VALUES (?1, ?2)",
                    params![url, name],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        debug!("Inserted image {}", id);
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> RegistryResult<Image> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let image = conn
                .query_row(
                    "SELECT id, name, url FROM images WHERE name = ?1 ORDER BY id LIMIT 1",
                    params![name],
                    row_to_image,
                )
                .optional()?;
            image.ok_or(RegistryError::NotFound(name))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_random(&self) -> RegistryResult<Image> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
            if count == 0 {
                return Err(RegistryError::Empty);
            }

            let offset = rand::thread_rng().gen_range(0..count);
            debug!(count, offset, "Selecting random image");

            conn.query_row(
                "SELECT id, name, url FROM images ORDER BY id LIMIT 1 OFFSET ?1",
                params![offset],
                row_to_image,
            )
            .optional()?
            .ok_or_else(|| RegistryError::NotFound(format!("offset {}", offset)))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RegistryResult<Vec<Image>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, url FROM images ORDER BY id")?;
            let images = stmt
                .query_map([], row_to_image)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(images)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RegistryResult<bool> {
        let removed = self
            .with_conn(move |conn| {
                let deleted = conn.execute("DELETE FROM images WHERE id = ?1", params![id])?;
                Ok(deleted > 0)
            })
            .await?;

        if removed {
            info!("Deleted image {}", id);
        }
        Ok(removed)
    }

    async fn count(&self) -> RegistryResult<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
            Ok(count as usize)
        })
        .await
    }
}
