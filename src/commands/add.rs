use crate::{
    db::{documents::DocumentStore, tasks::Tasks},
    libs::{
        config::Config,
        error::TaskError,
        messages::Message,
        prompt::Prompt,
        task::{format_due_date, parse_due_date, Priority, Task},
    },
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;

/// Prompts for a new task and stores it.
///
/// A blank title aborts. An unreadable due date is dropped and an unknown
/// priority becomes `Low`, each with a warning.
pub fn cmd<S: DocumentStore>(tasks: &mut Tasks<S>, config: &Config, prompt: &mut impl Prompt) -> Result<Option<Task>> {
    msg_print!(Message::AddTaskHeader, true);

    let title = prompt.text(&Message::PromptTaskTitle.to_string())?;
    if title.trim().is_empty() {
        msg_warning!(Message::TitleRequired);
        return Ok(None);
    }

    let description = prompt.text(&Message::PromptTaskDescription.to_string())?;

    let due_date = prompt.text(&Message::PromptDueDate.to_string())?;
    let due_date = match parse_due_date(Some(&due_date)) {
        Ok(date) => date.map(format_due_date),
        Err(_) => {
            msg_warning!(Message::InvalidDueDateNotSet);
            None
        }
    };

    msg_info!(Message::PriorityOptions(config.priority_names()));
    let priority = match prompt.text(&Message::PromptPriority.to_string())?.parse::<Priority>() {
        Ok(priority) if config.accepts_priority(priority) => priority,
        _ => {
            msg_warning!(Message::InvalidPriorityDefaultLow);
            Priority::Low
        }
    };

    match tasks.create(&title, description.trim(), due_date.as_deref(), Some(priority.as_str())) {
        Ok(task) => {
            msg_success!(Message::TaskCreated(task.id().to_string()));
            Ok(Some(task))
        }
        Err(e @ TaskError::Validation { .. }) => {
            msg_error!(Message::TaskCreateFailed(e.to_string()));
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
