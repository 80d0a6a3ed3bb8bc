// File: src/model/parser.rs
//! Turns one line of user input into a [`Command`].
//!
//! Parsing is pure: nothing here touches the task list or the task file.
//! Dates are kept as raw text; they are validated when the task is built.
use crate::error::{LaniaError, Result};

pub const BY_MARKER: &str = "/by";
pub const AT_MARKER: &str = "/at";
const DATE_TIME_FIELD: &str = "date/time";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Find(String),
    Complete(usize),
    Delete(usize),
    AddTodo(String),
    AddDeadline { description: String, by: String },
    AddEvent { description: String, at: String },
    Exit,
    Unknown(String),
}

impl Command {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Complete(_)
                | Command::Delete(_)
                | Command::AddTodo(_)
                | Command::AddDeadline { .. }
                | Command::AddEvent { .. }
        )
    }
}

/// Splits input into its command word and the trimmed remainder.
fn split_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

/// First whitespace-delimited token, case-sensitive. Empty for blank input.
pub fn parse_command_word(input: &str) -> &str {
    split_command(input).0
}

/// Everything after the command word, e.g. `"read book"` for `"todo read book"`.
pub fn parse_task_description(input: &str) -> Result<String> {
    let (word, rest) = split_command(input);
    if rest.is_empty() {
        return Err(LaniaError::empty(word));
    }
    Ok(rest.to_string())
}

fn split_on_marker(payload: &str, marker: &str, command: &str) -> Result<(String, String)> {
    // Only the first marker counts; anything after it belongs to the date.
    let (description, when) = payload
        .split_once(marker)
        .ok_or_else(|| LaniaError::empty(DATE_TIME_FIELD))?;
    let description = description.trim();
    let when = when.trim();
    if description.is_empty() {
        return Err(LaniaError::empty(command));
    }
    if when.is_empty() {
        return Err(LaniaError::empty(DATE_TIME_FIELD));
    }
    Ok((description.to_string(), when.to_string()))
}

/// `"read book /by 24-08-2021 18:00"` → `("read book", "24-08-2021 18:00")`.
pub fn parse_deadline(payload: &str) -> Result<(String, String)> {
    split_on_marker(payload, BY_MARKER, "deadline")
}

/// `"read book /at 24-08-2021 18:00"` → `("read book", "24-08-2021 18:00")`.
pub fn parse_event(payload: &str) -> Result<(String, String)> {
    split_on_marker(payload, AT_MARKER, "event")
}

/// Reads the 1-based task number of `done <n>` / `delete <n>`.
pub fn parse_index(input: &str) -> Result<usize> {
    let (word, rest) = split_command(input);
    match rest.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(LaniaError::InvalidIndex {
            command: word.to_string(),
            value: rest.to_string(),
        }),
    }
}

pub fn parse(input: &str) -> Result<Command> {
    let command = match parse_command_word(input) {
        "list" => Command::List,
        "bye" => Command::Exit,
        "find" => Command::Find(parse_task_description(input)?),
        "done" => Command::Complete(parse_index(input)?),
        "delete" => Command::Delete(parse_index(input)?),
        "todo" => Command::AddTodo(parse_task_description(input)?),
        "deadline" => {
            let (description, by) = parse_deadline(&parse_task_description(input)?)?;
            Command::AddDeadline { description, by }
        }
        "event" => {
            let (description, at) = parse_event(&parse_task_description(input)?)?;
            Command::AddEvent { description, at }
        }
        other => Command::Unknown(other.to_string()),
    };
    Ok(command)
}
