use super::{prompt_task, Outcome};
use crate::{
    db::{documents::DocumentStore, tasks::Tasks},
    libs::{messages::Message, prompt::Prompt, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;

pub fn cmd<S: DocumentStore>(tasks: &mut Tasks<S>, prompt: &mut impl Prompt) -> Result<Outcome> {
    msg_print!(Message::DeleteTaskHeader, true);

    let task = match prompt_task(tasks, prompt)? {
        Ok(task) => task,
        Err(outcome) => return Ok(outcome),
    };

    msg_print!(Message::TaskToDelete);
    View::task_details(&task);

    if !prompt.confirm(&Message::ConfirmDeleteTask.to_string())? {
        msg_info!(Message::DeletionCancelled);
        return Ok(Outcome::Skipped);
    }

    if tasks.delete(&task.id().to_string())? {
        msg_success!(Message::TaskDeleted);
        Ok(Outcome::Applied)
    } else {
        msg_error!(Message::TaskDeleteFailed);
        Ok(Outcome::Failed)
    }
}
