// File: src/store.rs
use crate::error::{LaniaError, Result};
use crate::model::Task;

/// Ordered tasks for one session. Insertion order is display order and file order.
///
/// All public indices are 1-based, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Task> {
        let pos = self.position(index)?;
        Ok(&self.tasks[pos])
    }

    fn position(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.tasks.len() {
            return Err(LaniaError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }

    /// Marks the task done and returns it for reporting.
    pub fn complete(&mut self, index: usize) -> Result<&Task> {
        let pos = self.position(index)?;
        self.tasks[pos].mark_complete();
        Ok(&self.tasks[pos])
    }

    /// Removes the task; later tasks shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        let pos = self.position(index)?;
        Ok(self.tasks.remove(pos))
    }

    /// Case-sensitive substring match on descriptions, in list order.
    pub fn find(&self, keyword: &str) -> TaskList {
        self.matches(keyword)
            .map(|(_, task)| task.clone())
            .collect()
    }

    /// Like [`find`](Self::find) but keeps each task's 1-based position in this list.
    pub fn matches<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.description.contains(keyword))
            .map(|(i, t)| (i + 1, t))
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
