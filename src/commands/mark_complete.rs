use super::{prompt_task, Outcome};
use crate::{
    db::{documents::DocumentStore, tasks::Tasks},
    libs::{messages::Message, prompt::Prompt, task::Status, view::View},
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;

/// Statuses offered for completion, in the order they are listed.
const OPEN_STATUSES: [Status; 2] = [Status::InProgress, Status::Pending];

/// Lists open tasks, then completes the one the user picks.
///
/// A task that is already completed is refused here even though
/// [`Tasks::mark_completed`] itself would accept it.
pub fn cmd<S: DocumentStore>(tasks: &mut Tasks<S>, prompt: &mut impl Prompt) -> Result<Outcome> {
    msg_print!(Message::MarkCompleteHeader, true);

    let mut open = 0;
    for status in OPEN_STATUSES {
        let found = tasks.get_by_status(status)?;
        if found.is_empty() {
            msg_info!(Message::NoTasksWithStatus(status.to_string()));
            continue;
        }
        msg_info!(Message::TasksWithStatusHeader(status.to_string()));
        View::task_ids(&found);
        open += found.len();
    }

    if open == 0 {
        msg_info!(Message::NoIncompleteTasks);
        return Ok(Outcome::Skipped);
    }

    let task = match prompt_task(tasks, prompt)? {
        Ok(task) => task,
        Err(outcome) => return Ok(outcome),
    };

    let (id, title) = (task.id().to_string(), task.title().to_string());
    if task.is_completed() {
        msg_warning!(Message::TaskAlreadyCompleted { id, title });
        return Ok(Outcome::AlreadyCompleted);
    }

    if tasks.mark_completed(&id)? {
        msg_success!(Message::TaskCompleted { id, title });
        Ok(Outcome::Applied)
    } else {
        msg_error!(Message::TaskCompleteFailed(id));
        Ok(Outcome::Failed)
    }
}
