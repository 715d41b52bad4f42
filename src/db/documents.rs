//! Document collections: the driver boundary of the task store.
//!
//! A document is a flat JSON object. Each collection keys its documents by the
//! string stored under [`ID_FIELD`], which is kept apart from the other fields
//! and never changes once inserted.
//!
//! Two collections implement [`DocumentStore`]:
//!
//! - [`SqliteCollection`]: one table per collection, one JSON body per row.
//!   Filters and sorting are evaluated by SQLite's `json_extract`.
//! - [`MemoryCollection`]: a plain vector, used for tests and scratch sessions.
//!
//! ## Usage
//!
//! ```rust
//! use taskman::db::documents::{Document, DocumentStore, SqliteCollection};
//! use rusqlite::Connection;
//! use serde_json::json;
//!
//! let mut tasks = SqliteCollection::open(Connection::open_in_memory()?, "tasks")?;
//! let doc: Document = json!({"_id": "a", "title": "Write docs"}).as_object().cloned().unwrap();
//! tasks.insert(&doc)?;
//! assert_eq!(tasks.find_one("a")?, Some(doc));
//! # Ok::<(), taskman::libs::error::TaskError>(())
//! ```

use crate::libs::error::{TaskError, TaskResult};
use crate::libs::sort::SortOrder;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde_json::{Map, Value};
use std::cmp::Ordering;

pub type Document = Map<String, Value>;

/// Name of the identifier field inside every document.
pub const ID_FIELD: &str = "_id";

/// Single-field ordering applied by [`DocumentStore::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSort {
    pub field: String,
    pub order: SortOrder,
}

impl DocumentSort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

/// Result of [`DocumentStore::update_one`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents whose identifier matched (0 or 1).
    pub matched: usize,
    /// Documents whose content actually changed (0 or 1).
    pub modified: usize,
}

pub trait DocumentStore {
    /// Stores a new document. The document must carry a string [`ID_FIELD`].
    fn insert(&mut self, doc: &Document) -> TaskResult<()>;

    /// Returns every document whose fields equal all entries of `filter`.
    /// Ties in `sort` keep insertion order in the requested direction.
    fn find(&self, filter: &Document, sort: Option<&DocumentSort>) -> TaskResult<Vec<Document>>;

    fn find_one(&self, id: &str) -> TaskResult<Option<Document>>;

    /// Overwrites the fields present in `set`, leaving the rest untouched.
    /// The identifier field is never rewritten.
    fn update_one(&mut self, id: &str, set: &Document) -> TaskResult<UpdateOutcome>;

    /// Returns the number of deleted documents (0 or 1).
    fn delete_one(&mut self, id: &str) -> TaskResult<usize>;

    fn count(&self) -> TaskResult<usize>;
}

pub struct SqliteCollection {
    conn: Connection,
    table: String,
}

impl SqliteCollection {
    /// Binds to the table named `collection`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Connection`] when `collection` is not a plain
    /// identifier, or a store error when the schema cannot be created.
    pub fn open(conn: Connection, collection: &str) -> TaskResult<Self> {
        if !is_identifier(collection) {
            return Err(TaskError::Connection(format!(
                "collection name '{}' must contain only letters, digits and underscores",
                collection
            )));
        }

        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                body TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON {table}(json_extract(body, '$.created_at'));",
            table = collection
        ))?;
        tracing::debug!(collection, "collection ready");

        Ok(Self {
            conn,
            table: collection.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.table
    }

    fn load(&self, sql: &str, values: Vec<SqlValue>) -> TaskResult<Vec<Document>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(values), |row| row.get::<_, String>(0))?;

        let mut docs = Vec::new();
        for body in rows {
            docs.push(serde_json::from_str(&body?)?);
        }
        Ok(docs)
    }
}

impl DocumentStore for SqliteCollection {
    fn insert(&mut self, doc: &Document) -> TaskResult<()> {
        let id = document_id(doc)?;
        let body = serde_json::to_string(doc)?;
        self.conn
            .execute(&format!("INSERT INTO {} (id, body) VALUES (?1, ?2)", self.table), params![id, body])?;
        tracing::debug!(collection = %self.table, id, "document inserted");
        Ok(())
    }

    fn find(&self, filter: &Document, sort: Option<&DocumentSort>) -> TaskResult<Vec<Document>> {
        let mut sql = format!("SELECT body FROM {}", self.table);
        let mut values = Vec::new();
        let mut clauses = Vec::new();

        for (field, value) in filter {
            values.push(SqlValue::Text(json_path(field)));
            match to_sql_value(value) {
                Some(bound) => {
                    clauses.push(format!("json_extract(body, ?{}) = ?{}", values.len(), values.len() + 1));
                    values.push(bound);
                }
                None => clauses.push(format!("json_extract(body, ?{}) IS NULL", values.len())),
            }
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        match sort {
            Some(sort) => {
                values.push(SqlValue::Text(json_path(&sort.field)));
                let direction = sort.order.as_sql();
                sql.push_str(&format!(
                    " ORDER BY json_extract(body, ?{}) {}, seq {}",
                    values.len(),
                    direction,
                    direction
                ));
            }
            None => sql.push_str(" ORDER BY seq ASC"),
        }

        tracing::debug!(collection = %self.table, %sql, "find");
        self.load(&sql, values)
    }

    fn find_one(&self, id: &str) -> TaskResult<Option<Document>> {
        let body: Option<String> = self
            .conn
            .query_row(&format!("SELECT body FROM {} WHERE id = ?1", self.table), params![id], |row| {
                row.get(0)
            })
            .optional()?;

        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    fn update_one(&mut self, id: &str, set: &Document) -> TaskResult<UpdateOutcome> {
        let tx = self.conn.transaction()?;

        let body: Option<String> = tx
            .query_row(&format!("SELECT body FROM {} WHERE id = ?1", self.table), params![id], |row| {
                row.get(0)
            })
            .optional()?;
        let Some(body) = body else {
            return Ok(UpdateOutcome::default());
        };

        let mut doc: Document = serde_json::from_str(&body)?;
        let modified = apply_set(&mut doc, set);
        if modified {
            tx.execute(
                &format!("UPDATE {} SET body = ?2 WHERE id = ?1", self.table),
                params![id, serde_json::to_string(&doc)?],
            )?;
        }
        tx.commit()?;

        tracing::debug!(collection = %self.table, id, modified, "document updated");
        Ok(UpdateOutcome {
            matched: 1,
            modified: usize::from(modified),
        })
    }

    fn delete_one(&mut self, id: &str) -> TaskResult<usize> {
        let deleted = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1", self.table), params![id])?;
        tracing::debug!(collection = %self.table, id, deleted, "document deleted");
        Ok(deleted)
    }

    fn count(&self) -> TaskResult<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Vector-backed collection with the same semantics as [`SqliteCollection`].
#[derive(Debug, Default, Clone)]
pub struct MemoryCollection {
    docs: Vec<Document>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.docs
            .iter()
            .position(|doc| doc.get(ID_FIELD).and_then(Value::as_str) == Some(id))
    }
}

impl DocumentStore for MemoryCollection {
    fn insert(&mut self, doc: &Document) -> TaskResult<()> {
        let id = document_id(doc)?;
        if self.position(id).is_some() {
            return Err(TaskError::validation(ID_FIELD, format!("duplicate identifier {}", id)));
        }
        self.docs.push(doc.clone());
        Ok(())
    }

    fn find(&self, filter: &Document, sort: Option<&DocumentSort>) -> TaskResult<Vec<Document>> {
        let mut found: Vec<Document> = self
            .docs
            .iter()
            .filter(|doc| {
                filter
                    .iter()
                    .all(|(field, expected)| doc.get(field).unwrap_or(&Value::Null) == expected)
            })
            .cloned()
            .collect();

        if let Some(sort) = sort {
            // Reverse first so that equal keys end up newest-first when descending.
            if sort.order == SortOrder::Desc {
                found.reverse();
            }
            found.sort_by(|a, b| {
                let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
                match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }
        Ok(found)
    }

    fn find_one(&self, id: &str) -> TaskResult<Option<Document>> {
        Ok(self.position(id).map(|index| self.docs[index].clone()))
    }

    fn update_one(&mut self, id: &str, set: &Document) -> TaskResult<UpdateOutcome> {
        let Some(index) = self.position(id) else {
            return Ok(UpdateOutcome::default());
        };
        let modified = apply_set(&mut self.docs[index], set);
        Ok(UpdateOutcome {
            matched: 1,
            modified: usize::from(modified),
        })
    }

    fn delete_one(&mut self, id: &str) -> TaskResult<usize> {
        match self.position(id) {
            Some(index) => {
                self.docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn count(&self) -> TaskResult<usize> {
        Ok(self.docs.len())
    }
}

/// Copies `set` into `doc`, skipping the identifier. Returns whether anything changed.
fn apply_set(doc: &mut Document, set: &Document) -> bool {
    let mut modified = false;
    for (field, value) in set {
        if field == ID_FIELD {
            continue;
        }
        if doc.get(field) != Some(value) {
            doc.insert(field.clone(), value.clone());
            modified = true;
        }
    }
    modified
}

fn document_id(doc: &Document) -> TaskResult<&str> {
    doc.get(ID_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| TaskError::validation(ID_FIELD, "document has no string identifier"))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', ""))
}

/// Maps a JSON scalar to what `json_extract` yields for it; `None` for null.
fn to_sql_value(value: &Value) -> Option<SqlValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        }),
        Value::String(s) => Some(SqlValue::Text(s.clone())),
        other => Some(SqlValue::Text(other.to_string())),
    }
}

/// Null and missing sort before any value, matching SQLite's NULL ordering.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
