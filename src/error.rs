// File: ./src/error.rs
//! Error types for Lania.
//!
//! Every variant renders as the message shown to the user, so the command
//! loop can report any failure with `to_string()` and keep going.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaniaError {
    /// A required argument (description, keyword, date/time) was left out.
    #[error("The description of {0} cannot be empty")]
    EmptyArgument(String),

    #[error("'{value}' is not a valid task number for {command}")]
    InvalidIndex { command: String, value: String },

    #[error("There is no task {index}, your list has {len} task(s)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Deliberately generic: chrono's parse error text is not surfaced.
    #[error("Invalid date format, please use dd-MM-yyyy HH:mm (e.g. 24-08-2021 18:00).")]
    DateFormat,

    #[error("Sorry, but Lania does not know what that means.")]
    UnknownCommand(String),

    #[error("Could not access the task file '{}': {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt record on line {line}: {reason}")]
    CorruptRecord { line: usize, reason: String },
}

impl LaniaError {
    pub fn empty(field: &str) -> Self {
        LaniaError::EmptyArgument(field.to_string())
    }

    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LaniaError::Persistence {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(line: usize, reason: impl Into<String>) -> Self {
        LaniaError::CorruptRecord {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LaniaError>;
