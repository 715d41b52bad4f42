//! Client-side ordering for task listings.
//!
//! The store returns tasks newest first; `list --sort field:order` reorders
//! them here. All sorts are stable, so tasks with equal keys keep the store's
//! order.
//!
//! | field        | key                                          |
//! |--------------|----------------------------------------------|
//! | `title`      | lowercase title                              |
//! | `priority`   | rank: High=3, Medium=2, Low=1                |
//! | `status`     | status text                                  |
//! | `created_at` | creation timestamp                           |
//! | `due_date`   | due date; tasks without one always go last   |

use crate::libs::task::Task;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// "ascending" / "descending", as shown above a listing.
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ascending",
            SortOrder::Desc => "descending",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Priority,
    Status,
    CreatedAt,
    DueDate,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Title,
        SortField::Priority,
        SortField::Status,
        SortField::CreatedAt,
        SortField::DueDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Priority => "priority",
            SortField::Status => "status",
            SortField::CreatedAt => "created_at",
            SortField::DueDate => "due_date",
        }
    }

    pub fn names() -> String {
        Self::ALL.iter().map(SortField::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or(wanted)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl TaskSort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Ordering of two tasks under this sort, direction included.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self.field {
            SortField::Title => self.order.apply(a.title().to_lowercase().cmp(&b.title().to_lowercase())),
            SortField::Priority => self.order.apply(a.priority().rank().cmp(&b.priority().rank())),
            SortField::Status => self.order.apply(a.status().as_str().cmp(b.status().as_str())),
            SortField::CreatedAt => self.order.apply(a.created_at().cmp(&b.created_at())),
            // Missing dates trail in both directions, so they bypass `apply`.
            SortField::DueDate => match (a.due_date(), b.due_date()) {
                (Some(x), Some(y)) => self.order.apply(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for TaskSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.field, self.order.label())
    }
}

/// Sorts in place; `None` keeps the order the tasks came in.
pub fn sort_tasks(tasks: &mut [Task], sort: Option<TaskSort>) {
    if let Some(sort) = sort {
        tasks.sort_by(|a, b| sort.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::NewTask;

    fn task(title: &str, priority: &str, status: &str, due: Option<&str>) -> Task {
        let mut input = NewTask::new(title).priority(priority).status(status);
        if let Some(due) = due {
            input = input.due_date(due);
        }
        Task::new(input).unwrap()
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(Task::title).collect()
    }

    #[test]
    fn test_due_date_missing_always_last() {
        let base = vec![
            task("none", "Low", "Pending", None),
            task("june", "Low", "Pending", Some("2024-06-01")),
            task("jan", "Low", "Pending", Some("2024-01-01")),
        ];

        let mut asc = base.clone();
        sort_tasks(&mut asc, Some(TaskSort::new(SortField::DueDate, SortOrder::Asc)));
        assert_eq!(titles(&asc), vec!["jan", "june", "none"]);

        let mut desc = base;
        sort_tasks(&mut desc, Some(TaskSort::new(SortField::DueDate, SortOrder::Desc)));
        assert_eq!(titles(&desc), vec!["june", "jan", "none"]);
    }

    #[test]
    fn test_priority_uses_rank_not_alphabet() {
        let mut tasks = vec![
            task("low", "Low", "Pending", None),
            task("high", "High", "Pending", None),
            task("medium", "Medium", "Pending", None),
        ];
        sort_tasks(&mut tasks, Some(TaskSort::new(SortField::Priority, SortOrder::Desc)));
        assert_eq!(titles(&tasks), vec!["high", "medium", "low"]);

        sort_tasks(&mut tasks, Some(TaskSort::new(SortField::Priority, SortOrder::Asc)));
        assert_eq!(titles(&tasks), vec!["low", "medium", "high"]);
    }

    #[test]
    fn test_title_is_case_insensitive() {
        let mut tasks = vec![
            task("banana", "Low", "Pending", None),
            task("Apple", "Low", "Pending", None),
            task("cherry", "Low", "Pending", None),
        ];
        sort_tasks(&mut tasks, Some(TaskSort::new(SortField::Title, SortOrder::Asc)));
        assert_eq!(titles(&tasks), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_status_is_lexicographic() {
        let mut tasks = vec![
            task("p", "Low", "Pending", None),
            task("c", "Low", "Completed", None),
            task("i", "Low", "In Progress", None),
        ];
        sort_tasks(&mut tasks, Some(TaskSort::new(SortField::Status, SortOrder::Asc)));
        assert_eq!(titles(&tasks), vec!["c", "i", "p"]);
    }

    #[test]
    fn test_created_at_is_chronological() {
        let first = task("first", "Low", "Pending", None);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = task("second", "Low", "Pending", None);

        let mut tasks = vec![first.clone(), second.clone()];
        sort_tasks(&mut tasks, Some(TaskSort::new(SortField::CreatedAt, SortOrder::Desc)));
        assert_eq!(titles(&tasks), vec!["second", "first"]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let mut tasks = vec![
            task("one", "High", "Pending", None),
            task("two", "High", "Pending", None),
            task("three", "Low", "Pending", None),
        ];
        sort_tasks(&mut tasks, Some(TaskSort::new(SortField::Priority, SortOrder::Desc)));
        assert_eq!(titles(&tasks), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_no_sort_preserves_order() {
        let mut tasks = vec![task("b", "Low", "Pending", None), task("a", "High", "Pending", None)];
        sort_tasks(&mut tasks, None);
        assert_eq!(titles(&tasks), vec!["b", "a"]);
    }

    #[test]
    fn test_parse_field_and_order() {
        assert_eq!("DUE_DATE".parse::<SortField>(), Ok(SortField::DueDate));
        assert!("deadline".parse::<SortField>().is_err());
        assert_eq!("Asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert!("up".parse::<SortOrder>().is_err());
    }
}
