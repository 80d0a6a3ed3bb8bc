// Encodes the task list to its plain-text file format and back, and manages the file itself.
//
// One record per line:
//   T | 0 | read book
//   D | 1 | return book | 24-08-2021 18:00
//   E | 0 | project meeting | 25-08-2021 14:00
//
// ⚠️ Only this module reads or writes that format.
use crate::error::{LaniaError, Result};
use crate::model::item::{INPUT_DATE_FORMAT, KindTag, TaskKind, parse_date_time};
use crate::model::Task;
use crate::store::TaskList;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const RECORD_DELIMITER: &str = " | ";

/// What a loader does with a line that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptRecordPolicy {
    /// Drop the line, keep the rest, and report it.
    #[default]
    Skip,
    /// Refuse the whole file.
    Abort,
}

// --- CODEC ---

pub fn encode_task(task: &Task) -> String {
    let flag = if task.done { "1" } else { "0" };
    let mut record = [task.tag().as_ref(), flag, task.description.as_str()].join(RECORD_DELIMITER);
    if let Some(dt) = task.date_time() {
        record.push_str(RECORD_DELIMITER);
        record.push_str(&dt.format(INPUT_DATE_FORMAT).to_string());
    }
    record
}

pub fn encode(tasks: &TaskList) -> Vec<String> {
    tasks.iter().map(encode_task).collect()
}

/// Decodes a single record. `line_no` is 1-based and only used for error reporting.
pub fn decode_line(line: &str, line_no: usize) -> Result<Task> {
    let mut fields = line.splitn(3, RECORD_DELIMITER);
    let (Some(tag), Some(flag), Some(rest)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(LaniaError::corrupt(line_no, "expected at least 3 fields"));
    };

    let tag = KindTag::from_str(tag.trim())
        .map_err(|_| LaniaError::corrupt(line_no, format!("unknown task kind '{}'", tag.trim())))?;

    let done = match flag.trim() {
        "0" => false,
        "1" => true,
        other => {
            return Err(LaniaError::corrupt(
                line_no,
                format!("invalid done flag '{}'", other),
            ));
        }
    };

    // The date is always the last field, so descriptions may contain the delimiter.
    let (description, kind) = match tag {
        KindTag::Todo => (rest, TaskKind::Todo),
        KindTag::Deadline | KindTag::Event => {
            let (description, raw) = rest
                .rsplit_once(RECORD_DELIMITER)
                .ok_or_else(|| LaniaError::corrupt(line_no, "missing date/time field"))?;
            let dt = parse_date_time(raw).map_err(|_| {
                LaniaError::corrupt(line_no, format!("unparsable date/time '{}'", raw.trim()))
            })?;
            let kind = if tag == KindTag::Deadline {
                TaskKind::Deadline { by: dt }
            } else {
                TaskKind::Event { at: dt }
            };
            (description, kind)
        }
    };

    let mut task = Task::with_kind(description, kind, "task")
        .map_err(|_| LaniaError::corrupt(line_no, "empty description"))?;
    task.done = done;
    Ok(task)
}

/// Strict decode: the first corrupt record fails the whole load.
pub fn decode<S: AsRef<str>>(lines: &[S]) -> Result<TaskList> {
    records(lines).collect()
}

/// Lenient decode: corrupt records are left out and returned alongside the list.
pub fn decode_lenient<S: AsRef<str>>(lines: &[S]) -> (TaskList, Vec<LaniaError>) {
    let mut tasks = TaskList::new();
    let mut skipped = Vec::new();
    for record in records(lines) {
        match record {
            Ok(task) => tasks.add(task),
            Err(e) => skipped.push(e),
        }
    }
    (tasks, skipped)
}

pub fn decode_with<S: AsRef<str>>(
    lines: &[S],
    policy: CorruptRecordPolicy,
) -> Result<(TaskList, Vec<LaniaError>)> {
    match policy {
        CorruptRecordPolicy::Skip => Ok(decode_lenient(lines)),
        CorruptRecordPolicy::Abort => Ok((decode(lines)?, Vec::new())),
    }
}

fn records<S: AsRef<str>>(lines: &[S]) -> impl Iterator<Item = Result<Task>> + '_ {
    lines
        .iter()
        .map(|line| line.as_ref())
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| decode_line(line, i + 1))
}

// --- STORE HANDLES ---

/// Read/write-lines capability the session persists through.
pub trait TaskStorage: std::fmt::Debug {
    /// All stored lines; a store that does not exist yet yields no lines.
    fn read_lines(&self) -> Result<Vec<String>>;

    /// Replaces the whole store with `lines`.
    fn write_lines(&self, lines: &[String]) -> Result<()>;

    fn load(&self, policy: CorruptRecordPolicy) -> Result<(TaskList, Vec<LaniaError>)> {
        let lines = self.read_lines()?;
        decode_with(&lines, policy)
    }

    fn save(&self, tasks: &TaskList) -> Result<()> {
        self.write_lines(&encode(tasks))
    }
}

/// The task file on disk.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar lock file path, e.g. `lania.txt` -> `lania.txt.lock`.
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> io::Result<T>
    where
        F: FnOnce() -> io::Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: write to a .tmp file then rename over the target.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)
    }
}

impl TaskStorage for LocalStorage {
    fn read_lines(&self) -> Result<Vec<String>> {
        let path = self.path.as_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = Self::with_lock(path, || fs::read_to_string(path))
            .map_err(|e| LaniaError::persistence(path, e))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    fn write_lines(&self, lines: &[String]) -> Result<()> {
        let path = self.path.as_path();
        let mut contents = lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        let write = || -> io::Result<()> {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            Self::with_lock(path, || Self::atomic_write(path, &contents))
        };
        write().map_err(|e| LaniaError::persistence(path, e))
    }
}

/// Keeps the lines in memory. Writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    lines: RefCell<Vec<String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: RefCell::new(lines.into_iter().map(Into::into).collect()),
            fail_writes: Cell::new(false),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl TaskStorage for MemoryStorage {
    fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.lines())
    }

    fn write_lines(&self, lines: &[String]) -> Result<()> {
        if self.fail_writes.get() {
            return Err(LaniaError::persistence(
                "<memory>",
                io::Error::other("writes disabled"),
            ));
        }
        *self.lines.borrow_mut() = lines.to_vec();
        Ok(())
    }
}
