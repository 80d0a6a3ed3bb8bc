// File: ./src/model/display.rs
use crate::model::item::{Task, TaskKind, format_date_time};
use std::fmt;

pub trait TaskDisplay {
    fn checkbox_symbol(&self) -> &'static str;
    fn date_suffix(&self) -> String;
    fn render(&self) -> String;
}

impl TaskDisplay for Task {
    fn checkbox_symbol(&self) -> &'static str {
        if self.done { "[X]" } else { "[ ]" }
    }

    fn date_suffix(&self) -> String {
        match &self.kind {
            TaskKind::Todo => String::new(),
            TaskKind::Deadline { by } => format!(" (by: {})", format_date_time(by)),
            TaskKind::Event { at } => format!(" (at: {})", format_date_time(at)),
        }
    }

    /// `[<tag>][<X or space>] <description>` plus the date for deadlines and events.
    fn render(&self) -> String {
        format!(
            "[{}]{} {}{}",
            self.tag(),
            self.checkbox_symbol(),
            self.description,
            self.date_suffix()
        )
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
