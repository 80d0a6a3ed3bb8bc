// File: ./src/model/item.rs
use crate::error::{LaniaError, Result};
use chrono::NaiveDateTime;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Pattern accepted from the user and written to the task file.
pub const INPUT_DATE_FORMAT: &str = "%d-%m-%Y %H:%M";
/// Pattern used when showing a date back to the user ("Aug 24 2021 6:00PM").
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d %Y %-I:%M%p";

/// Single-letter tag identifying a task variant, shared by rendering and the task file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, EnumIter)]
pub enum KindTag {
    #[strum(serialize = "T")]
    Todo,
    #[strum(serialize = "D")]
    Deadline,
    #[strum(serialize = "E")]
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { by: NaiveDateTime },
    Event { at: NaiveDateTime },
}

impl TaskKind {
    pub fn tag(&self) -> KindTag {
        match self {
            TaskKind::Todo => KindTag::Todo,
            TaskKind::Deadline { .. } => KindTag::Deadline,
            TaskKind::Event { .. } => KindTag::Event,
        }
    }

    pub fn date_time(&self) -> Option<NaiveDateTime> {
        match self {
            TaskKind::Todo => None,
            TaskKind::Deadline { by } => Some(*by),
            TaskKind::Event { at } => Some(*at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub done: bool,
    pub kind: TaskKind,
}

/// Exactly `dd-MM-yyyy HH:mm`: chrono alone also takes single-digit fields.
fn has_input_shape(input: &str) -> bool {
    const SHAPE: &[u8; 16] = b"00-00-0000 00:00";
    let bytes = input.as_bytes();
    bytes.len() == SHAPE.len()
        && bytes.iter().zip(SHAPE).all(|(b, s)| match *s {
            b'0' => b.is_ascii_digit(),
            _ => b == s,
        })
}

/// Parses a `dd-MM-yyyy HH:mm` string, e.g. `24-08-2021 18:00`.
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    if !has_input_shape(input) {
        return Err(LaniaError::DateFormat);
    }
    NaiveDateTime::parse_from_str(input, INPUT_DATE_FORMAT).map_err(|_| LaniaError::DateFormat)
}

pub fn format_date_time(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_DATE_FORMAT).to_string()
}

impl Task {
    pub fn todo(description: &str) -> Result<Self> {
        Self::with_kind(description, TaskKind::Todo, "todo")
    }

    pub fn deadline(description: &str, by: &str) -> Result<Self> {
        let by = parse_date_time(by)?;
        Self::with_kind(description, TaskKind::Deadline { by }, "deadline")
    }

    pub fn event(description: &str, at: &str) -> Result<Self> {
        let at = parse_date_time(at)?;
        Self::with_kind(description, TaskKind::Event { at }, "event")
    }

    /// Builds a task from already-validated parts. The description must be non-empty.
    pub fn with_kind(description: &str, kind: TaskKind, field: &str) -> Result<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(LaniaError::empty(field));
        }
        Ok(Self {
            description: description.to_string(),
            done: false,
            kind,
        })
    }

    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    pub fn date_time(&self) -> Option<NaiveDateTime> {
        self.kind.date_time()
    }

    /// Idempotent: completing a finished task leaves it finished.
    pub fn mark_complete(&mut self) {
        self.done = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_todo_rejects_blank_description() {
        let err = Task::todo("   ").unwrap_err();
        assert_eq!(err.to_string(), "The description of todo cannot be empty");
    }

    #[test]
    fn test_deadline_parses_input_pattern() {
        let t = Task::deadline("return book", "24-08-2021 18:00").unwrap();
        let by = t.date_time().unwrap();
        assert_eq!((by.day(), by.month(), by.year()), (24, 8, 2021));
        assert_eq!((by.hour(), by.minute()), (18, 0));
        assert_eq!(t.tag(), KindTag::Deadline);
    }

    #[test]
    fn test_bad_date_fails_at_construction() {
        assert!(matches!(
            Task::event("party", "2021-08-24 18:00"),
            Err(LaniaError::DateFormat)
        ));
        assert!(matches!(
            Task::deadline("essay", "tomorrow"),
            Err(LaniaError::DateFormat)
        ));
    }

    #[test]
    fn test_date_fields_need_two_digits() {
        for bad in ["1-8-2021 6:00", "24-08-21 18:00", "24-08-2021 6:00", "24/08/2021 18:00"] {
            assert!(
                matches!(Task::deadline("x", bad), Err(LaniaError::DateFormat)),
                "{} should be rejected",
                bad
            );
        }
        // Right shape, impossible values
        assert!(matches!(
            parse_date_time("31-02-2021 18:00"),
            Err(LaniaError::DateFormat)
        ));
        assert!(parse_date_time(" 01-08-2021 06:00 ").is_ok());
    }

    #[test]
    fn test_mark_complete_is_idempotent() {
        let mut t = Task::todo("sleep").unwrap();
        t.mark_complete();
        t.mark_complete();
        assert!(t.done);
    }

    #[test]
    fn test_kind_tags_roundtrip_through_strum() {
        for tag in KindTag::iter() {
            assert_eq!(KindTag::from_str(tag.as_ref()).unwrap(), tag);
        }
        assert!(KindTag::from_str("X").is_err());
    }

    #[test]
    fn test_display_format_uses_12h_clock() {
        let dt = parse_date_time("24-08-2021 18:00").unwrap();
        assert_eq!(format_date_time(&dt), "Aug 24 2021 6:00PM");
        let morning = parse_date_time("01-02-2022 09:05").unwrap();
        assert_eq!(format_date_time(&morning), "Feb 1 2022 9:05AM");
    }
}
