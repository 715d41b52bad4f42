use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::{TaskError, TaskResult};
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

pub const SQLITE_SCHEME: &str = "sqlite:";
pub const MEMORY_URI: &str = "sqlite::memory:";
pub const DB_FILE_EXTENSION: &str = "db";

/// Where a store URI points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

impl StoreLocation {
    /// Resolves `uri` and `database` into a location.
    ///
    /// - `sqlite::memory:` → in-memory database
    /// - `sqlite://` → `<data dir>/<database>.db`
    /// - `sqlite://<dir>` → `<dir>/<database>.db`
    pub fn resolve(uri: &str, database: &str) -> TaskResult<Self> {
        let uri = uri.trim();
        if uri == MEMORY_URI {
            return Ok(StoreLocation::Memory);
        }

        let Some(dir) = uri.strip_prefix(SQLITE_SCHEME).and_then(|rest| rest.strip_prefix("//")) else {
            return Err(TaskError::Connection(format!(
                "unsupported store URI '{}', expected sqlite://<dir> or {}",
                uri, MEMORY_URI
            )));
        };

        if database.is_empty() || database.contains(['/', '\\']) || database.starts_with('.') {
            return Err(TaskError::Connection(format!("invalid database name '{}'", database)));
        }
        let file_name = format!("{}.{}", database, DB_FILE_EXTENSION);

        let storage = if dir.is_empty() { DataStorage::new() } else { DataStorage::at(dir) };
        let path = storage
            .get_path(&file_name)
            .map_err(|e| TaskError::Connection(e.to_string()))?;

        Ok(StoreLocation::File(path))
    }
}

/// The single store connection held for the lifetime of the shell.
pub struct Db {
    pub conn: Connection,
    pub location: StoreLocation,
}

impl Db {
    pub fn open(config: &Config) -> TaskResult<Db> {
        let location = StoreLocation::resolve(&config.store_uri, &config.database_name)?;
        Self::open_at(location)
    }

    pub fn open_at(location: StoreLocation) -> TaskResult<Db> {
        let conn = match &location {
            StoreLocation::Memory => Connection::open_in_memory(),
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(|e| TaskError::Connection(e.to_string()))?;
                }
                Connection::open(path)
            }
        }
        .map_err(|e| TaskError::Connection(e.to_string()))?;

        // Equivalent of a driver ping: fails fast on unreadable or non-database files.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map_err(|e| TaskError::Connection(e.to_string()))?;

        tracing::info!(?location, "connected to task store");
        Ok(Db { conn, location })
    }
}
