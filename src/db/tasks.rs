//! Task repository and query service over a document collection.
//!
//! Identifiers arrive as user-typed strings. A string that is not a valid
//! task identifier is treated exactly like an identifier that matches
//! nothing: lookups return `None` and mutations return `false`.

use super::db::Db;
use super::documents::{Document, DocumentSort, DocumentStore, SqliteCollection, ID_FIELD};
use crate::libs::config::Config;
use crate::libs::error::{TaskError, TaskResult};
use crate::libs::sort::SortOrder;
use crate::libs::task::{format_due_date, parse_due_date, validate_description, validate_title, NewTask, Priority, Status, Task, TaskId};
use serde_json::Value;

/// Natural order of every query: newest first.
const CREATED_AT_DESC: (&str, SortOrder) = ("created_at", SortOrder::Desc);

/// Exact-match filters. Both set means both must match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl TaskQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |status| task.status() == status)
            && self.priority.map_or(true, |priority| task.priority() == priority)
    }

    fn to_filter(self) -> Document {
        let mut filter = Document::new();
        if let Some(status) = self.status {
            filter.insert("status".to_string(), Value::String(status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            filter.insert("priority".to_string(), Value::String(priority.as_str().to_string()));
        }
        filter
    }
}

/// Partial update. `None` means "not supplied"; for every field except the
/// description, a blank string means "not supplied" too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl TaskUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// True when no field would be applied.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && [&self.title, &self.due_date, &self.priority, &self.status]
                .into_iter()
                .all(|field| supplied(field).is_none())
    }

    /// Validates and normalises every supplied field into a `$set` document.
    pub fn to_set(&self) -> TaskResult<Document> {
        let mut set = Document::new();
        if let Some(title) = supplied(&self.title) {
            set.insert("title".to_string(), Value::String(validate_title(title)?));
        }
        if let Some(description) = &self.description {
            set.insert("description".to_string(), Value::String(validate_description(description)?));
        }
        if let Some(date) = parse_due_date(supplied(&self.due_date))? {
            set.insert("due_date".to_string(), Value::String(format_due_date(date)));
        }
        if let Some(priority) = supplied(&self.priority) {
            let priority: Priority = priority.parse()?;
            set.insert("priority".to_string(), Value::String(priority.as_str().to_string()));
        }
        if let Some(status) = supplied(&self.status) {
            let status: Status = status.parse()?;
            set.insert("status".to_string(), Value::String(status.as_str().to_string()));
        }
        Ok(set)
    }
}

fn supplied(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}

pub struct Tasks<S = SqliteCollection> {
    store: S,
}

impl Tasks<SqliteCollection> {
    /// Opens the configured store and binds to the task collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Connection`] when the store cannot be reached.
    pub fn open(config: &Config) -> TaskResult<Self> {
        let db = Db::open(config)?;
        let collection = SqliteCollection::open(db.conn, &config.collection_name)?;
        Ok(Self::with_store(collection))
    }
}

impl<S: DocumentStore> Tasks<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates and stores a new pending task.
    pub fn create(&mut self, title: &str, description: &str, due_date: Option<&str>, priority: Option<&str>) -> TaskResult<Task> {
        let mut input = NewTask::new(title).description(description);
        input.due_date = due_date.map(str::to_string);
        input.priority = priority.map(str::to_string);

        let task = Task::new(input)?;
        self.store.insert(&task.to_document())?;
        tracing::info!(task_id = %task.id(), title = task.title(), "task created");
        Ok(task)
    }

    pub fn get_all(&self) -> TaskResult<Vec<Task>> {
        self.find(&TaskQuery::all())
    }

    pub fn get_by_status(&self, status: Status) -> TaskResult<Vec<Task>> {
        self.find(&TaskQuery::all().with_status(status))
    }

    pub fn get_by_priority(&self, priority: Priority) -> TaskResult<Vec<Task>> {
        self.find(&TaskQuery::all().with_priority(priority))
    }

    /// Tasks matching every filter in `query`, newest first.
    ///
    /// Documents that no longer pass validation are skipped and logged.
    pub fn find(&self, query: &TaskQuery) -> TaskResult<Vec<Task>> {
        let (field, order) = CREATED_AT_DESC;
        let docs = self.store.find(&query.to_filter(), Some(&DocumentSort::new(field, order)))?;

        let mut tasks = Vec::with_capacity(docs.len());
        for doc in &docs {
            match Task::from_document(doc) {
                Ok(task) => tasks.push(task),
                Err(e) => tracing::warn!(error = %e, id = ?doc.get(ID_FIELD), "skipping invalid task document"),
            }
        }
        Ok(tasks)
    }

    pub fn get_by_id(&self, id: &str) -> TaskResult<Option<Task>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        match self.store.find_one(&id.to_string())? {
            Some(doc) => Task::from_document(&doc).map(Some),
            None => Ok(None),
        }
    }

    /// Like [`Tasks::get_by_id`], but a missing task is an error.
    pub fn require(&self, id: &str) -> TaskResult<Task> {
        self.get_by_id(id)?.ok_or_else(|| TaskError::NotFound(id.trim().to_string()))
    }

    /// Applies the supplied fields of `changes`.
    ///
    /// Returns `false` when the id is malformed or unknown, when nothing was
    /// supplied, or when every supplied value equals the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] for an invalid supplied value; nothing
    /// is written in that case.
    pub fn update(&mut self, id: &str, changes: &TaskUpdate) -> TaskResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let set = changes.to_set()?;
        if set.is_empty() {
            return Ok(false);
        }

        let outcome = self.store.update_one(&id.to_string(), &set)?;
        tracing::info!(task_id = %id, fields = ?set.keys().collect::<Vec<_>>(), modified = outcome.modified, "task update");
        Ok(outcome.modified > 0)
    }

    /// Sets the status to `Completed`. Idempotent: returns `true` whenever the
    /// task exists, whether or not it was already completed.
    pub fn mark_completed(&mut self, id: &str) -> TaskResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let mut set = Document::new();
        set.insert("status".to_string(), Value::String(Status::Completed.as_str().to_string()));

        let outcome = self.store.update_one(&id.to_string(), &set)?;
        tracing::info!(task_id = %id, matched = outcome.matched, "task marked completed");
        Ok(outcome.matched > 0)
    }

    pub fn delete(&mut self, id: &str) -> TaskResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let deleted = self.store.delete_one(&id.to_string())?;
        tracing::info!(task_id = %id, deleted, "task delete");
        Ok(deleted > 0)
    }

    pub fn count(&self) -> TaskResult<usize> {
        self.store.count()
    }
}

fn parse_id(raw: &str) -> Option<TaskId> {
    match raw.parse::<TaskId>() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(id = raw, error = %e, "malformed task id");
            None
        }
    }
}
