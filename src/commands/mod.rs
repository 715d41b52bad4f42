//! The interactive shell and its commands.
//!
//! The shell is a read-dispatch loop: read a line, take its first word as
//! the command, run the handler, repeat until `exit` or the input ends.
//! Handlers return `anyhow::Result`; any error they raise is reported here and
//! the loop keeps going.

pub mod add;
pub mod delete;
pub mod help;
pub mod list;
pub mod mark_complete;
pub mod update;

use crate::{
    db::{documents::DocumentStore, tasks::Tasks},
    libs::{
        config::Config,
        messages::Message,
        prompt::{is_interrupt, Prompt},
        task::Task,
    },
    msg_error, msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use std::io;

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Add,
    List(Vec<String>),
    MarkComplete,
    Update,
    Delete,
    Exit,
    Unknown(String),
}

impl Command {
    /// Parses a shell line. The command word is case-insensitive; blank lines
    /// yield `None`.
    pub fn parse(line: &str) -> Option<Command> {
        let mut words = line.split_whitespace();
        let name = words.next()?.to_lowercase();

        let command = match name.as_str() {
            "help" => Command::Help,
            "add" => Command::Add,
            "list" => Command::List(words.map(str::to_string).collect()),
            "mark_complete" => Command::MarkComplete,
            "update" => Command::Update,
            "delete" => Command::Delete,
            "exit" => Command::Exit,
            _ => Command::Unknown(line.trim().to_string()),
        };
        Some(command)
    }
}

/// What a task-changing command ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The store was changed.
    Applied,
    /// Nothing to do: missing input, nothing eligible, no changes, or cancelled.
    Skipped,
    NotFound,
    AlreadyCompleted,
    /// The repository reported that nothing was written.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Stopped,
    Running,
}

pub struct Shell<S: DocumentStore, P: Prompt> {
    tasks: Tasks<S>,
    config: Config,
    prompt: P,
    state: ShellState,
}

impl<S: DocumentStore, P: Prompt> Shell<S, P> {
    pub fn new(tasks: Tasks<S>, config: Config, prompt: P) -> Self {
        Self {
            tasks,
            config,
            prompt,
            state: ShellState::Stopped,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn tasks(&self) -> &Tasks<S> {
        &self.tasks
    }

    /// Runs the loop until `exit`, an interrupt, or the end of input.
    ///
    /// # Errors
    ///
    /// Only a failure to read input that is not an interrupt ends the loop
    /// with an error.
    pub fn run(&mut self) -> Result<()> {
        self.state = ShellState::Running;
        msg_info!(Message::HelpHint);

        while self.state == ShellState::Running {
            let line = match self.prompt.command(&Message::PromptCommand.to_string()) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.stop();
                    break;
                }
                Err(e) if is_interrupt(&e) => {
                    self.stop();
                    break;
                }
                Err(e) => {
                    self.state = ShellState::Stopped;
                    return Err(e.into());
                }
            };

            let Some(command) = Command::parse(&line) else {
                continue;
            };
            tracing::debug!(?command, "dispatching shell command");

            if let Err(e) = self.execute(command) {
                if e.downcast_ref::<io::Error>().is_some_and(is_interrupt) {
                    self.stop();
                    break;
                }
                tracing::error!(error = %e, "command failed");
                msg_error!(Message::CommandFailed(e.to_string()));
            }

            if self.state == ShellState::Running {
                msg_info!(Message::HelpHint);
            }
        }

        Ok(())
    }

    /// Runs one command against the store.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Help => help::cmd(),
            Command::Add => add::cmd(&mut self.tasks, &self.config, &mut self.prompt).map(drop),
            Command::List(args) => list::cmd(&self.tasks, &self.config, &mut self.prompt, &args).map(drop),
            Command::MarkComplete => mark_complete::cmd(&mut self.tasks, &mut self.prompt).map(drop),
            Command::Update => update::cmd(&mut self.tasks, &self.config, &mut self.prompt).map(drop),
            Command::Delete => delete::cmd(&mut self.tasks, &mut self.prompt).map(drop),
            Command::Exit => {
                self.stop();
                Ok(())
            }
            Command::Unknown(line) => {
                msg_error!(Message::UnknownCommand(line));
                Ok(())
            }
        }
    }

    fn stop(&mut self) {
        self.state = ShellState::Stopped;
        msg_print!(Message::Goodbye, true);
    }
}

/// Reads a task id and loads the task, reporting a missing id or task.
pub(crate) fn prompt_task<S: DocumentStore>(
    tasks: &Tasks<S>,
    prompt: &mut impl Prompt,
) -> Result<Result<Task, Outcome>> {
    let id = prompt.text(&Message::PromptTaskId.to_string())?;
    let id = id.trim();
    if id.is_empty() {
        msg_error!(Message::TaskIdRequired);
        return Ok(Err(Outcome::Skipped));
    }

    match tasks.get_by_id(id)? {
        Some(task) => Ok(Ok(task)),
        None => {
            msg_warning!(Message::TaskNotFound(id.to_string()));
            Ok(Err(Outcome::NotFound))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_word_is_case_insensitive() {
        assert_eq!(Command::parse("  HELP "), Some(Command::Help));
        assert_eq!(Command::parse("Mark_Complete"), Some(Command::MarkComplete));
        assert_eq!(Command::parse("exit now"), Some(Command::Exit));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   \t"), None);
    }

    #[test]
    fn test_parse_list_keeps_arguments() {
        assert_eq!(
            Command::parse("list --filter status:Pending --sort due_date:asc"),
            Some(Command::List(vec![
                "--filter".to_string(),
                "status:Pending".to_string(),
                "--sort".to_string(),
                "due_date:asc".to_string(),
            ]))
        );
    }

    #[test]
    fn test_parse_unknown_keeps_line() {
        assert_eq!(Command::parse(" frobnicate all "), Some(Command::Unknown("frobnicate all".to_string())));
    }
}
