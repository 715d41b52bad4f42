//! Persistence for tasks.
//!
//! - [`db`]: resolves the configured store URI and opens the SQLite connection
//! - [`documents`]: the document collection boundary and its SQLite and
//!   in-memory implementations
//! - [`tasks`]: the task repository built on a collection

pub mod db;
pub mod documents;
pub mod tasks;
