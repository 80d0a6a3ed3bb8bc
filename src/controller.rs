// File: src/controller.rs
//! Command dispatch for one session.
//!
//! A [`Session`] owns the task list and the store handle. Every line goes
//! parse → apply → persist → message before the next one is read. Mutations
//! are written through right away; a failed write is reported but the
//! in-memory list stays as it is and remains authoritative.
use crate::error::{LaniaError, Result};
use crate::model::parser::{self, Command};
use crate::model::Task;
use crate::storage::{CorruptRecordPolicy, TaskStorage};
use crate::store::TaskList;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Exited,
}

#[derive(Debug)]
pub struct Session {
    tasks: TaskList,
    storage: Box<dyn TaskStorage>,
    state: SessionState,
}

impl Session {
    pub fn new(tasks: TaskList, storage: Box<dyn TaskStorage>) -> Self {
        Self {
            tasks,
            storage,
            state: SessionState::Running,
        }
    }

    /// Loads the stored tasks. Never fails: problems come back as notices
    /// for the user and the session starts with whatever could be read.
    pub fn open(storage: Box<dyn TaskStorage>, policy: CorruptRecordPolicy) -> (Self, Vec<String>) {
        let mut notices = Vec::new();
        let tasks = match storage.load(policy) {
            Ok((tasks, skipped)) => {
                for e in &skipped {
                    log::warn!("{}", e);
                    notices.push(ui::skipped_record(e));
                }
                tasks
            }
            Err(e) => {
                log::error!("Failed to load tasks: {}", e);
                notices.push(ui::load_failed(&e));
                TaskList::new()
            }
        };
        log::info!("Session opened with {} task(s)", tasks.len());
        (Self::new(tasks, storage), notices)
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// One request/response step. Errors are turned into the reply.
    pub fn handle(&mut self, line: &str) -> String {
        match parser::parse(line).and_then(|command| self.execute(command)) {
            Ok(message) => message,
            Err(e) => {
                log::debug!("Command '{}' failed: {}", line.trim(), e);
                ui::error(&e)
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<String> {
        log::debug!("Dispatching {:?}", command);
        let mutating = command.is_mutating();
        let message = match command {
            Command::List => ui::list(&self.tasks),
            Command::Find(keyword) => ui::matches(self.tasks.matches(&keyword)),
            Command::Exit => {
                self.state = SessionState::Exited;
                ui::goodbye()
            }
            Command::Unknown(word) => return Err(LaniaError::UnknownCommand(word)),
            Command::Complete(index) => ui::completed(self.tasks.complete(index)?),
            Command::Delete(index) => {
                let task = self.tasks.remove(index)?;
                ui::removed(&self.tasks, &task)
            }
            Command::AddTodo(description) => self.add(Task::todo(&description)?),
            Command::AddDeadline { description, by } => {
                self.add(Task::deadline(&description, &by)?)
            }
            Command::AddEvent { description, at } => self.add(Task::event(&description, &at)?),
        };
        if mutating {
            Ok(self.persist(message))
        } else {
            Ok(message)
        }
    }

    fn add(&mut self, task: Task) -> String {
        let message_task = task.clone();
        self.tasks.add(task);
        ui::added(&self.tasks, &message_task)
    }

    fn persist(&self, message: String) -> String {
        match self.storage.save(&self.tasks) {
            Ok(()) => message,
            Err(e) => {
                log::error!("Failed to save tasks: {}", e);
                format!("{}\n{}", message, ui::save_failed(&e))
            }
        }
    }
}
