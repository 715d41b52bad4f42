//! Configuration for the taskman shell.
//!
//! The configuration is read once at startup from `config.json` in the
//! platform data directory (see [`DataStorage`]). A missing file is not an
//! error: every option has a default, and any option may be omitted from the
//! file.
//!
//! ## Options
//!
//! - **`store_uri`**: where the document store lives. `sqlite://` uses the
//!   data directory, `sqlite://<dir>` a custom directory, and
//!   `sqlite::memory:` a throwaway in-memory store
//! - **`database_name`**: file stem of the SQLite database (`task_manager.db`)
//! - **`collection_name`**: table holding the task documents
//! - **`priority_levels`** / **`status_options`**: values offered by the
//!   shell's prompts and accepted by `list --filter`
//!
//! The store options can be overridden with `TASKMAN_STORE_URI`,
//! `TASKMAN_DATABASE` and `TASKMAN_COLLECTION`, either from the environment or
//! from a `.env` file in the working directory.
//!
//! ## Example
//!
//! ```json
//! {
//!   "store_uri": "sqlite:///home/me/tasks",
//!   "database_name": "work",
//!   "collection_name": "tasks",
//!   "priority_levels": ["High", "Medium", "Low"],
//!   "status_options": ["Pending", "In Progress", "Completed"]
//! }
//! ```

use super::data_storage::DataStorage;
use crate::libs::task::{Priority, Status};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_STORE_URI: &str = "sqlite://";
pub const DEFAULT_DATABASE_NAME: &str = "task_manager";
pub const DEFAULT_COLLECTION_NAME: &str = "tasks";

pub const ENV_STORE_URI: &str = "TASKMAN_STORE_URI";
pub const ENV_DATABASE: &str = "TASKMAN_DATABASE";
pub const ENV_COLLECTION: &str = "TASKMAN_COLLECTION";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub store_uri: String,
    pub database_name: String,
    pub collection_name: String,
    pub priority_levels: Vec<Priority>,
    pub status_options: Vec<Status>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_uri: DEFAULT_STORE_URI.to_string(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            priority_levels: Priority::ALL.to_vec(),
            status_options: Status::ALL.to_vec(),
        }
    }
}

impl Config {
    /// Reads `config.json`, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Startup entry point: file, then `.env`, then environment overrides.
    pub fn load() -> Result<Config> {
        let config = Self::read()?;
        // A missing .env file is the normal case.
        let _ = dotenv::dotenv();
        Ok(config.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(uri) = env::var(ENV_STORE_URI) {
            self.store_uri = uri;
        }
        if let Ok(database) = env::var(ENV_DATABASE) {
            self.database_name = database;
        }
        if let Ok(collection) = env::var(ENV_COLLECTION) {
            self.collection_name = collection;
        }
        self
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn accepts_priority(&self, priority: Priority) -> bool {
        self.priority_levels.contains(&priority)
    }

    pub fn accepts_status(&self, status: Status) -> bool {
        self.status_options.contains(&status)
    }

    pub fn priority_names(&self) -> String {
        self.priority_levels.iter().map(Priority::as_str).collect::<Vec<_>>().join(", ")
    }

    pub fn status_names(&self) -> String {
        self.status_options.iter().map(Status::as_str).collect::<Vec<_>>().join(", ")
    }
}
