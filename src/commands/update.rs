use super::{prompt_task, Outcome};
use crate::{
    db::{
        documents::DocumentStore,
        tasks::{TaskUpdate, Tasks},
    },
    libs::{
        config::Config,
        error::TaskError,
        messages::Message,
        prompt::Prompt,
        task::{format_due_date, parse_due_date, Priority, Status, Task},
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;

/// Typed as the new description to clear it.
pub const CLEAR_VALUE: &str = "-";

/// Shows a task and asks for a new value for each field.
///
/// An empty answer keeps the current value. Only values that differ from the
/// stored ones are sent to the repository.
pub fn cmd<S: DocumentStore>(tasks: &mut Tasks<S>, config: &Config, prompt: &mut impl Prompt) -> Result<Outcome> {
    msg_print!(Message::UpdateTaskHeader, true);

    let task = match prompt_task(tasks, prompt)? {
        Ok(task) => task,
        Err(outcome) => return Ok(outcome),
    };

    msg_print!(Message::CurrentTaskState);
    View::task_details(&task);
    msg_print!(Message::EnterNewValues, true);

    let changes = prompt_changes(&task, config, prompt)?;
    if changes.is_empty() {
        msg_info!(Message::NoChangesMade);
        return Ok(Outcome::Skipped);
    }

    match tasks.update(&task.id().to_string(), &changes) {
        Ok(true) => {
            msg_success!(Message::TaskUpdated);
            Ok(Outcome::Applied)
        }
        Ok(false) => {
            msg_error!(Message::TaskUpdateFailed);
            Ok(Outcome::Failed)
        }
        Err(e @ TaskError::Validation { .. }) => {
            msg_error!(Message::ValidationFailed(e.to_string()));
            Ok(Outcome::Failed)
        }
        Err(e) => Err(e.into()),
    }
}

fn prompt_changes(task: &Task, config: &Config, prompt: &mut impl Prompt) -> Result<TaskUpdate> {
    let mut changes = TaskUpdate::new();

    let title = prompt.text(&Message::PromptTitleEdit(task.title().to_string()).to_string())?;
    let title = title.trim();
    if !title.is_empty() && title != task.title() {
        changes.title = Some(title.to_string());
    }

    let description = prompt.text(&Message::PromptDescriptionEdit(task.description().to_string()).to_string())?;
    let description = match description.trim() {
        "" => None,
        CLEAR_VALUE => Some(""),
        other => Some(other),
    };
    if let Some(description) = description.filter(|d| *d != task.description()) {
        changes.description = Some(description.to_string());
    }

    let current_due = task.due_date().map_or_else(|| "Not set".to_string(), format_due_date);
    let due_date = prompt.text(&Message::PromptDueDateEdit(current_due).to_string())?;
    match parse_due_date(Some(&due_date)) {
        Ok(Some(date)) if Some(date) != task.due_date() => changes.due_date = Some(format_due_date(date)),
        Ok(_) => {}
        Err(_) => msg_warning!(Message::InvalidDueDateNotUpdated),
    }

    msg_info!(Message::PriorityOptions(config.priority_names()));
    let priority = prompt.text(&Message::PromptPriorityEdit(task.priority().to_string()).to_string())?;
    if !priority.trim().is_empty() {
        match priority.parse::<Priority>() {
            Ok(priority) if config.accepts_priority(priority) => {
                if priority != task.priority() {
                    changes.priority = Some(priority.to_string());
                }
            }
            _ => msg_warning!(Message::InvalidPriorityNotUpdated),
        }
    }

    msg_info!(Message::StatusOptions(config.status_names()));
    let status = prompt.text(&Message::PromptStatusEdit(task.status().to_string()).to_string())?;
    if !status.trim().is_empty() {
        match status.parse::<Status>() {
            Ok(status) if config.accepts_status(status) => {
                if status != task.status() {
                    changes.status = Some(status.to_string());
                }
            }
            _ => msg_warning!(Message::InvalidStatusNotUpdated),
        }
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{repo, script};
    use chrono::NaiveDate;

    #[test]
    fn test_update_changes_supplied_fields() {
        let mut tasks = repo();
        let task = tasks.create("Draft", "first pass", None, Some("Low")).unwrap();
        let id = task.id().to_string();
        let mut prompt = script(&[&id, "Final", "", "2024-03-15", "high", "in progress"]);

        assert_eq!(cmd(&mut tasks, &Config::default(), &mut prompt).unwrap(), Outcome::Applied);

        let updated = tasks.get_by_id(&id).unwrap().unwrap();
        assert_eq!(updated.title(), "Final");
        assert_eq!(updated.description(), "first pass");
        assert_eq!(updated.due_date(), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(updated.priority(), Priority::High);
        assert_eq!(updated.status(), Status::InProgress);
        assert_eq!(updated.created_at(), task.created_at());
    }

    #[test]
    fn test_update_clears_description() {
        let mut tasks = repo();
        let task = tasks.create("Draft", "first pass", None, None).unwrap();
        let id = task.id().to_string();
        let mut prompt = script(&[&id, "", "-", "", "", ""]);

        assert_eq!(cmd(&mut tasks, &Config::default(), &mut prompt).unwrap(), Outcome::Applied);
        assert_eq!(tasks.get_by_id(&id).unwrap().unwrap().description(), "");
    }

    #[test]
    fn test_update_without_changes() {
        let mut tasks = repo();
        let task = tasks.create("Draft", "", Some("2024-01-01"), Some("Medium")).unwrap();
        let id = task.id().to_string();
        // same values typed back, plus invalid ones that are skipped
        let mut prompt = script(&[&id, "Draft", "", "someday", "urgent", "Pending"]);

        assert_eq!(cmd(&mut tasks, &Config::default(), &mut prompt).unwrap(), Outcome::Skipped);
        assert_eq!(tasks.get_by_id(&id).unwrap(), Some(task));
    }

    #[test]
    fn test_update_reports_invalid_title() {
        let mut tasks = repo();
        let task = tasks.create("Draft", "", None, None).unwrap();
        let id = task.id().to_string();
        let title = "x".repeat(201);
        let mut prompt = script(&[&id, &title, "", "", "", ""]);

        assert_eq!(cmd(&mut tasks, &Config::default(), &mut prompt).unwrap(), Outcome::Failed);
        assert_eq!(tasks.get_by_id(&id).unwrap(), Some(task));
    }

    #[test]
    fn test_update_unknown_task() {
        let mut tasks = repo();
        let mut prompt = script(&["00000000-0000-4000-8000-000000000000"]);

        assert_eq!(cmd(&mut tasks, &Config::default(), &mut prompt).unwrap(), Outcome::NotFound);
    }
}
