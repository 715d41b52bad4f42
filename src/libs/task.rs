//! Task entity: the validated in-memory projection of one stored document.
//!
//! Every field passes through the same validation rules whether it comes from
//! user input or from the store:
//!
//! - **title**: trimmed, non-empty, at most 200 characters
//! - **description**: at most 1000 characters, may be empty
//! - **due date**: any recognised calendar date, normalised to `YYYY-MM-DD`
//! - **priority / status**: case-insensitive, normalised to title case
//!
//! `id` and `created_at` are assigned once in [`Task::new`] and have no
//! setters, so they cannot change for the lifetime of a task.
//!
//! ## Usage
//!
//! ```rust
//! use taskman::libs::task::{NewTask, Task, Priority};
//!
//! let task = Task::new(NewTask::new("  Write report ").priority("high").due_date("2024-06-01"))?;
//! assert_eq!(task.title(), "Write report");
//! assert_eq!(task.priority(), Priority::High);
//! # Ok::<(), taskman::libs::error::TaskError>(())
//! ```

use crate::db::documents::{Document, ID_FIELD};
use crate::libs::error::{TaskError, TaskResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Storage format of `due_date`.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats accepted for due-date input, tried in order.
const DATE_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%d.%m.%Y", "%m/%d/%Y", "%B %d %Y", "%d %B %Y",
];
const DATETIME_INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Opaque, immutable task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Sort weight: High=3, Medium=2, Low=1.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = title_case(s);
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == normalized)
            .ok_or_else(|| TaskError::validation("priority", format!("must be one of: {}", join_names(&Self::ALL, Self::as_str))))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = title_case(s);
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| TaskError::validation("status", format!("must be one of: {}", join_names(&Self::ALL, Self::as_str))))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated input for [`Task::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
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
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    due_date: Option<NaiveDate>,
    priority: Priority,
    status: Status,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Validates `input` and assigns a fresh identifier and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] naming the first offending field.
    pub fn new(input: NewTask) -> TaskResult<Self> {
        Self::build(TaskId::new(), now(), input)
    }

    fn build(id: TaskId, created_at: DateTime<Utc>, input: NewTask) -> TaskResult<Self> {
        Ok(Self {
            id,
            title: validate_title(&input.title)?,
            description: validate_description(&input.description)?,
            due_date: parse_due_date(input.due_date.as_deref())?,
            priority: input.priority.as_deref().map(str::parse::<Priority>).transpose()?.unwrap_or_default(),
            status: input.status.as_deref().map(str::parse::<Status>).transpose()?.unwrap_or_default(),
            created_at,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Flat storage document; the identifier lives under [`ID_FIELD`].
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(ID_FIELD.to_string(), Value::String(self.id.to_string()));
        doc.insert("title".to_string(), Value::String(self.title.clone()));
        doc.insert("description".to_string(), Value::String(self.description.clone()));
        doc.insert(
            "due_date".to_string(),
            self.due_date.map_or(Value::Null, |date| Value::String(format_due_date(date))),
        );
        doc.insert("priority".to_string(), Value::String(self.priority.as_str().to_string()));
        doc.insert("status".to_string(), Value::String(self.status.as_str().to_string()));
        doc.insert("created_at".to_string(), Value::String(format_timestamp(self.created_at)));
        doc
    }

    /// Rebuilds a task from a stored document.
    ///
    /// Missing optional fields fall back to their defaults. A stored due date
    /// that is not a date is read as absent.
    pub fn from_document(doc: &Document) -> TaskResult<Self> {
        let id = text_field(doc, ID_FIELD)
            .and_then(|raw| raw.parse::<TaskId>().ok())
            .ok_or_else(|| TaskError::validation(ID_FIELD, "missing or malformed identifier"))?;

        let created_at = match text_field(doc, "created_at") {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|e| TaskError::validation("created_at", e.to_string()))?,
            None => now(),
        };

        let due_date = match text_field(doc, "due_date") {
            Some(raw) => match parse_due_date(Some(raw)) {
                Ok(date) => date.map(format_due_date),
                Err(_) => {
                    tracing::warn!(task_id = %id, due_date = raw, "ignoring unparseable stored due date");
                    None
                }
            },
            None => None,
        };

        let input = NewTask {
            title: text_field(doc, "title").unwrap_or_default().to_string(),
            description: text_field(doc, "description").unwrap_or_default().to_string(),
            due_date,
            priority: text_field(doc, "priority").map(str::to_string),
            status: text_field(doc, "status").map(str::to_string),
        };

        Self::build(id, created_at, input)
    }

    /// Multi-line block used by the update, delete and detail views.
    pub fn details(&self) -> String {
        format!(
            "ID: {}\nTitle: {}\nDescription: {}\nDue Date: {}\nPriority: {}\nStatus: {}\nCreated: {}\n{}",
            self.id,
            self.title,
            self.description,
            self.due_date.map_or_else(|| "Not set".to_string(), format_due_date),
            self.priority,
            self.status,
            self.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
            "-".repeat(50)
        )
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task(id={}, title='{}', status='{}')", self.id, self.title, self.status)
    }
}

pub fn validate_title(raw: &str) -> TaskResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TaskError::validation("title", "cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(TaskError::validation("title", format!("cannot exceed {} characters", MAX_TITLE_CHARS)));
    }
    Ok(title.to_string())
}

pub fn validate_description(raw: &str) -> TaskResult<String> {
    if raw.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(TaskError::validation(
            "description",
            format!("cannot exceed {} characters", MAX_DESCRIPTION_CHARS),
        ));
    }
    Ok(raw.to_string())
}

/// Parses an optional due date. Absent or blank input yields `None`.
pub fn parse_due_date(raw: Option<&str>) -> TaskResult<Option<NaiveDate>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.date_naive()));
    }
    if let Some(dt) = DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Ok(Some(dt.date()));
    }

    let cleaned = raw.replace(',', " ").split_whitespace().collect::<Vec<_>>().join(" ");
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
        .map(Some)
        .ok_or_else(|| TaskError::validation("due_date", "must be a valid date (e.g., YYYY-MM-DD)"))
}

pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

/// RFC 3339 with microseconds in UTC, which sorts lexicographically.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// `"in progress"` -> `"In Progress"`.
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn text_field<'a>(doc: &'a Document, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(Value::as_str)
}

fn join_names<T>(items: &[T], name: fn(&T) -> &'static str) -> String {
    items.iter().map(name).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task::new(
            NewTask::new("Write report")
                .description("Quarterly numbers")
                .due_date("2024-06-01")
                .priority("High")
                .status("In Progress"),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let task = Task::new(NewTask::new("Buy milk")).unwrap();
        assert_eq!(task.priority(), Priority::Medium);
        assert_eq!(task.status(), Status::Pending);
        assert_eq!(task.description(), "");
        assert_eq!(task.due_date(), None);
    }

    #[test]
    fn test_title_is_trimmed() {
        let task = Task::new(NewTask::new("   padded  ")).unwrap();
        assert_eq!(task.title(), "padded");
    }

    #[test]
    fn test_blank_title_rejected() {
        for title in ["", "   ", "\t\n"] {
            let err = Task::new(NewTask::new(title)).unwrap_err();
            assert_eq!(err.field(), Some("title"));
        }
    }

    #[test]
    fn test_title_length_limit() {
        assert!(Task::new(NewTask::new("a".repeat(200))).is_ok());
        let err = Task::new(NewTask::new("a".repeat(201))).unwrap_err();
        assert_eq!(err.field(), Some("title"));
        // Surrounding whitespace does not count towards the limit.
        assert!(Task::new(NewTask::new(format!("  {}  ", "a".repeat(200)))).is_ok());
    }

    #[test]
    fn test_description_length_limit() {
        assert!(Task::new(NewTask::new("t").description("d".repeat(1000))).is_ok());
        let err = Task::new(NewTask::new("t").description("d".repeat(1001))).unwrap_err();
        assert_eq!(err.field(), Some("description"));
    }

    #[test]
    fn test_priority_and_status_normalized() {
        let task = Task::new(NewTask::new("t").priority("  hIGH ").status("in progress")).unwrap();
        assert_eq!(task.priority(), Priority::High);
        assert_eq!(task.status(), Status::InProgress);
    }

    #[test]
    fn test_unknown_priority_and_status_rejected() {
        let err = Task::new(NewTask::new("t").priority("urgent")).unwrap_err();
        assert_eq!(err.field(), Some("priority"));
        let err = Task::new(NewTask::new("t").status("done")).unwrap_err();
        assert_eq!(err.field(), Some("status"));
        let err = Task::new(NewTask::new("t").priority("")).unwrap_err();
        assert_eq!(err.field(), Some("priority"));
    }

    #[test]
    fn test_due_date_normalized() {
        let cases = [
            ("2024-06-01", "2024-06-01"),
            ("2024/6/1", "2024-06-01"),
            ("01.06.2024", "2024-06-01"),
            ("06/01/2024", "2024-06-01"),
            ("June 1, 2024", "2024-06-01"),
            ("1 Jun 2024", "2024-06-01"),
            ("2024-06-01T09:30:00Z", "2024-06-01"),
            ("2024-06-01 09:30", "2024-06-01"),
        ];
        for (input, expected) in cases {
            let task = Task::new(NewTask::new("t").due_date(input)).unwrap();
            assert_eq!(task.due_date().map(format_due_date).as_deref(), Some(expected), "input {input}");
        }
    }

    #[test]
    fn test_blank_due_date_is_none() {
        let task = Task::new(NewTask::new("t").due_date("  ")).unwrap();
        assert_eq!(task.due_date(), None);
    }

    #[test]
    fn test_invalid_due_date_rejected() {
        for input in ["tomorrow", "2024-13-01", "2023-02-29"] {
            let err = Task::new(NewTask::new("t").due_date(input)).unwrap_err();
            assert_eq!(err.field(), Some("due_date"), "input {input}");
        }
    }

    #[test]
    fn test_document_round_trip() {
        let task = sample();
        let restored = Task::from_document(&task.to_document()).unwrap();
        assert_eq!(restored, task);

        let bare = Task::new(NewTask::new("bare")).unwrap();
        assert_eq!(Task::from_document(&bare.to_document()).unwrap(), bare);
    }

    #[test]
    fn test_document_layout() {
        let doc = sample().to_document();
        assert!(doc["_id"].as_str().unwrap().parse::<TaskId>().is_ok());
        assert_eq!(doc["title"], "Write report");
        assert_eq!(doc["due_date"], "2024-06-01");
        assert_eq!(doc["priority"], "High");
        assert_eq!(doc["status"], "In Progress");
        assert!(doc["created_at"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_from_document_defaults_missing_fields() {
        let mut doc = Document::new();
        doc.insert("_id".to_string(), Value::String(TaskId::new().to_string()));
        doc.insert("title".to_string(), Value::String("Only a title".to_string()));

        let task = Task::from_document(&doc).unwrap();
        assert_eq!(task.description(), "");
        assert_eq!(task.due_date(), None);
        assert_eq!(task.priority(), Priority::Medium);
        assert_eq!(task.status(), Status::Pending);
    }

    #[test]
    fn test_from_document_rejects_bad_values() {
        let mut doc = sample().to_document();
        doc.insert("status".to_string(), Value::String("Archived".to_string()));
        assert_eq!(Task::from_document(&doc).unwrap_err().field(), Some("status"));

        let mut doc = sample().to_document();
        doc.insert("_id".to_string(), Value::String("not-an-id".to_string()));
        assert_eq!(Task::from_document(&doc).unwrap_err().field(), Some("_id"));
    }

    #[test]
    fn test_from_document_ignores_unparseable_due_date() {
        let mut doc = sample().to_document();
        doc.insert("due_date".to_string(), Value::String("someday".to_string()));
        assert_eq!(Task::from_document(&doc).unwrap().due_date(), None);
    }

    #[test]
    fn test_details_rendering() {
        let task = Task::new(NewTask::new("Plan trip")).unwrap();
        let details = task.details();
        assert!(details.contains(&format!("ID: {}", task.id())));
        assert!(details.contains("Title: Plan trip"));
        assert!(details.contains("Due Date: Not set"));
        assert!(details.contains("Priority: Medium"));
        assert!(details.contains("Status: Pending"));
        assert!(details.ends_with(&"-".repeat(50)));
    }

    #[test]
    fn test_task_id_parsing() {
        let id = TaskId::new();
        assert_eq!(id.to_string().parse::<TaskId>().unwrap(), id);
        assert!("12345".parse::<TaskId>().is_err());
        assert!("".parse::<TaskId>().is_err());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("in progress"), "In Progress");
        assert_eq!(title_case("IN   PROGRESS"), "In Progress");
        assert_eq!(title_case(" low "), "Low");
    }
}
