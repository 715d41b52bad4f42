use super::task::{format_due_date, Task};
use anyhow::Result;
use chrono::Local;
use prettytable::{row, Table};

pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        Self::task_table(tasks).printstd();
        Ok(())
    }

    /// Numbered table of `tasks` in the order given.
    pub fn task_table(tasks: &[Task]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["#", "ID", "TITLE", "DUE DATE", "PRIORITY", "STATUS", "CREATED"]);
        for (index, task) in tasks.iter().enumerate() {
            table.add_row(row![
                index + 1,
                task.id(),
                task.title(),
                task.due_date().map_or_else(|| "-".to_string(), format_due_date),
                task.priority(),
                task.status(),
                task.created_at().with_timezone(&Local).format(CREATED_FORMAT)
            ]);
        }

        table
    }

    /// One `id - title` line per task, used where the user has to pick an id.
    pub fn task_ids(tasks: &[Task]) {
        for task in tasks {
            println!("{} - {}", task.id(), task.title());
        }
    }

    pub fn task_details(task: &Task) {
        println!("{}", task.details());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::NewTask;

    #[test]
    fn test_task_table_rows() {
        let tasks = vec![
            Task::new(NewTask::new("First").due_date("2024-06-01").priority("high")).unwrap(),
            Task::new(NewTask::new("Second")).unwrap(),
        ];
        let table = View::task_table(&tasks);

        assert_eq!(table.len(), 3);
        let first = table.get_row(1).unwrap();
        assert_eq!(first.get_cell(0).unwrap().get_content(), "1");
        assert_eq!(first.get_cell(1).unwrap().get_content(), tasks[0].id().to_string());
        assert_eq!(first.get_cell(3).unwrap().get_content(), "2024-06-01");
        assert_eq!(first.get_cell(4).unwrap().get_content(), "High");

        let second = table.get_row(2).unwrap();
        assert_eq!(second.get_cell(3).unwrap().get_content(), "-");
        assert_eq!(second.get_cell(5).unwrap().get_content(), "Pending");
    }
}
