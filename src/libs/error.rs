//! Error types shared by the task entity, the document store and the
//! repository layer.
//!
//! Command handlers work with `anyhow::Result` and let these errors bubble up
//! to the shell, which reports them and keeps running. Only
//! [`TaskError::Connection`] is fatal, and only at startup.

use thiserror::Error;

/// Result alias used by the entity and storage layers.
pub type TaskResult<T> = Result<T, TaskError>;

/// Errors produced while validating, storing or loading tasks.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A field value violates the entity rules. The task is not persisted.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The identifier is well formed but no document carries it.
    #[error("task {0} not found")]
    NotFound(String),

    /// The store could not be opened or is misconfigured.
    #[error("cannot connect to the task store: {0}")]
    Connection(String),

    /// Driver-level failure while talking to the store.
    #[error("task store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// A stored document could not be encoded or decoded.
    #[error("malformed task document: {0}")]
    Document(#[from] serde_json::Error),
}

impl TaskError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
