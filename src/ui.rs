// File: ./src/ui.rs
//! Texts Lania answers with. Front ends only print these.
use crate::model::{Task, TaskDisplay};
use crate::store::TaskList;

pub fn greeting() -> String {
    "Hello! I'm Lania\nWhat can I do for you?".to_string()
}

pub fn goodbye() -> String {
    "Bye. Hope to see you again soon!".to_string()
}

fn task_count(tasks: &TaskList) -> String {
    match tasks.len() {
        1 => "Now you have 1 task in the list.".to_string(),
        n => format!("Now you have {} tasks in the list.", n),
    }
}

fn numbered<'a>(rows: impl Iterator<Item = (usize, &'a Task)>) -> String {
    rows.map(|(i, t)| format!("{}.{}", i, t.render()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn list(tasks: &TaskList) -> String {
    if tasks.is_empty() {
        return "There are no tasks in your list.".to_string();
    }
    format!(
        "Here are the tasks in your list:\n{}",
        numbered(tasks.iter().enumerate().map(|(i, t)| (i + 1, t)))
    )
}

/// Search hits, numbered by their position in the full list.
pub fn matches<'a>(hits: impl Iterator<Item = (usize, &'a Task)>) -> String {
    let body = numbered(hits);
    if body.is_empty() {
        return "There are no matching tasks in your list.".to_string();
    }
    format!("Here are the matching tasks in your list:\n{}", body)
}

pub fn added(tasks: &TaskList, task: &Task) -> String {
    format!(
        "Got it. I've added this task:\n  {}\n{}",
        task.render(),
        task_count(tasks)
    )
}

pub fn completed(task: &Task) -> String {
    format!("Nice! I've marked this task as done:\n  {}", task.render())
}

pub fn removed(tasks: &TaskList, task: &Task) -> String {
    format!(
        "Noted. I've removed this task:\n  {}\n{}",
        task.render(),
        task_count(tasks)
    )
}

pub fn error(e: &dyn std::fmt::Display) -> String {
    format!("OOPS!!! {}", e)
}

pub fn save_failed(e: &dyn std::fmt::Display) -> String {
    format!("Lania could not save your tasks, changes are kept until you exit. ({})", e)
}

pub fn load_failed(e: &dyn std::fmt::Display) -> String {
    format!("Lania could not load your saved tasks, starting with an empty list. ({})", e)
}

pub fn skipped_record(e: &dyn std::fmt::Display) -> String {
    format!("Skipped a damaged saved task. ({})", e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_numbering() {
        let tasks: TaskList = ["a", "b"].iter().map(|n| Task::todo(n).unwrap()).collect();
        assert_eq!(
            list(&tasks),
            "Here are the tasks in your list:\n1.[T][ ] a\n2.[T][ ] b"
        );
        assert_eq!(list(&TaskList::new()), "There are no tasks in your list.");
    }

    #[test]
    fn test_added_counts_singular() {
        let mut tasks = TaskList::new();
        let t = Task::todo("a").unwrap();
        tasks.add(t.clone());
        assert!(added(&tasks, &t).ends_with("Now you have 1 task in the list."));
    }
}
