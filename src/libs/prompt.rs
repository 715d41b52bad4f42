//! Line-based input for the shell.
//!
//! [`TerminalPrompt`] drives `dialoguer` widgets on an interactive terminal.
//! [`ScriptedPrompt`] reads the same answers one line at a time from any
//! reader, which is what the shell uses when stdin is piped and what the
//! tests use to replay sessions.
//!
//! Both report a user interrupt (Ctrl-C) as [`io::ErrorKind::Interrupted`] and
//! input ending in the middle of a command as [`io::ErrorKind::UnexpectedEof`].
//! The shell treats either as a request to stop.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::io::{self, BufRead, Write};

pub trait Prompt {
    /// Next shell command line, or `None` once the input is exhausted.
    fn command(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Free-text answer; may be empty.
    fn text(&mut self, prompt: &str) -> io::Result<String>;

    /// Yes/no question, defaulting to no.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;

    /// Index of the chosen item, or `None` when nothing valid was chosen.
    fn select(&mut self, prompt: &str, items: &[&str]) -> io::Result<Option<usize>>;
}

/// Returns true for the errors that mean "the user wants out".
pub fn is_interrupt(error: &io::Error) -> bool {
    matches!(error.kind(), io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof)
}

pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn command(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.text(prompt).map(Some)
    }

    fn text(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(into_io)
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(into_io)
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> io::Result<Option<usize>> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(into_io)
    }
}

fn into_io(error: dialoguer::Error) -> io::Error {
    match error {
        dialoguer::Error::IO(e) => e,
    }
}

pub struct ScriptedPrompt<R> {
    input: R,
    echo: bool,
}

impl<R: BufRead> ScriptedPrompt<R> {
    /// Silent reader: prompts are not written anywhere.
    pub fn new(input: R) -> Self {
        Self { input, echo: false }
    }

    /// Reader that writes each prompt to stdout before reading the answer.
    pub fn echoing(input: R) -> Self {
        Self { input, echo: true }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.echo {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{} ", prompt)?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn answer(&mut self, prompt: &str) -> io::Result<String> {
        self.read_line(prompt)?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input ended while a command was waiting for an answer"))
    }
}

impl ScriptedPrompt<io::BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        Self::echoing(io::BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> Prompt for ScriptedPrompt<R> {
    fn command(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.read_line(prompt)
    }

    fn text(&mut self, prompt: &str) -> io::Result<String> {
        self.answer(&format!("{}:", prompt))
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.answer(&format!("{} (y/N):", prompt))?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    /// Accepts an item name (case-insensitive) or its 1-based position.
    fn select(&mut self, prompt: &str, items: &[&str]) -> io::Result<Option<usize>> {
        let answer = self.answer(&format!("{} [{}]:", prompt, items.join("/")))?;
        let answer = answer.trim();

        if let Ok(position) = answer.parse::<usize>() {
            return Ok((1..=items.len()).contains(&position).then(|| position - 1));
        }
        Ok(items.iter().position(|item| item.eq_ignore_ascii_case(answer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> ScriptedPrompt<Cursor<Vec<u8>>> {
        ScriptedPrompt::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn test_command_ends_with_input() {
        let mut prompt = scripted("list\r\n");
        assert_eq!(prompt.command(">").unwrap(), Some("list".to_string()));
        assert_eq!(prompt.command(">").unwrap(), None);
    }

    #[test]
    fn test_answer_after_end_is_interrupt() {
        let mut prompt = scripted("");
        let err = prompt.text("Title").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(is_interrupt(&err));
    }

    #[test]
    fn test_confirm() {
        let mut prompt = scripted("y\nYes\nn\n\n");
        assert!(prompt.confirm("?").unwrap());
        assert!(prompt.confirm("?").unwrap());
        assert!(!prompt.confirm("?").unwrap());
        assert!(!prompt.confirm("?").unwrap());
    }

    #[test]
    fn test_select_by_name_or_position() {
        let items = ["Pending", "In Progress", "Completed"];
        let mut prompt = scripted("in progress\n3\n0\nDone\n");
        assert_eq!(prompt.select("Status", &items).unwrap(), Some(1));
        assert_eq!(prompt.select("Status", &items).unwrap(), Some(2));
        assert_eq!(prompt.select("Status", &items).unwrap(), None);
        assert_eq!(prompt.select("Status", &items).unwrap(), None);
    }
}
