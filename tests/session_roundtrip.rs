// End-to-end tests of the command session against real and in-memory stores.
use lania::context::{AppContext, TestContext};
use lania::controller::{Session, SessionState};
use lania::storage::{CorruptRecordPolicy, LocalStorage, MemoryStorage, TaskStorage};
use lania::store::TaskList;
use std::fs;
use std::rc::Rc;

/// Shares one in-memory store between the session and the test.
#[derive(Debug, Clone, Default)]
struct SharedMemory(Rc<MemoryStorage>);

impl TaskStorage for SharedMemory {
    fn read_lines(&self) -> lania::Result<Vec<String>> {
        self.0.read_lines()
    }

    fn write_lines(&self, lines: &[String]) -> lania::Result<()> {
        self.0.write_lines(lines)
    }
}

fn shared_session() -> (Session, Rc<MemoryStorage>) {
    let memory = SharedMemory::default();
    let handle = memory.0.clone();
    (Session::new(TaskList::new(), Box::new(memory)), handle)
}

#[test]
fn test_every_mutation_is_written_through() {
    let (mut session, memory) = shared_session();

    session.handle("todo read book");
    assert_eq!(memory.lines(), vec!["T | 0 | read book"]);

    session.handle("deadline return book /by 24-08-2021 18:00");
    session.handle("done 1");
    assert_eq!(
        memory.lines(),
        vec!["T | 1 | read book", "D | 0 | return book | 24-08-2021 18:00"]
    );

    session.handle("delete 1");
    assert_eq!(memory.lines(), vec!["D | 0 | return book | 24-08-2021 18:00"]);
}

#[test]
fn test_read_only_commands_do_not_write() {
    let (mut session, memory) = shared_session();
    session.handle("todo a");
    memory.set_fail_writes(true);

    let reply = session.handle("list");
    assert_eq!(reply, "Here are the tasks in your list:\n1.[T][ ] a");
    let reply = session.handle("find a");
    assert!(!reply.contains("could not save"));
}

#[test]
fn test_failed_save_keeps_memory_state() {
    let (mut session, memory) = shared_session();
    memory.set_fail_writes(true);

    let reply = session.handle("todo write report");
    assert!(reply.starts_with("Got it. I've added this task:"));
    assert!(reply.contains("Lania could not save your tasks"));
    assert_eq!(session.tasks().len(), 1);
    assert!(memory.lines().is_empty());

    // Next successful write carries everything
    memory.set_fail_writes(false);
    session.handle("todo second");
    assert_eq!(memory.lines().len(), 2);
}

#[test]
fn test_find_numbers_follow_the_full_list() {
    let (mut session, _memory) = shared_session();
    session.handle("todo read paper");
    session.handle("todo read book");

    let reply = session.handle("find book");
    assert_eq!(
        reply,
        "Here are the matching tasks in your list:\n2.[T][ ] read book"
    );
    session.handle("done 2");
    assert!(session.tasks().get(2).unwrap().done);
    assert!(!session.tasks().get(1).unwrap().done);
}

#[test]
fn test_state_machine_reaches_exit() {
    let (mut session, _memory) = shared_session();
    assert_eq!(session.state(), SessionState::Running);
    session.handle("nonsense");
    assert_eq!(session.state(), SessionState::Running);
    session.handle("bye");
    assert_eq!(session.state(), SessionState::Exited);
}

#[test]
fn test_restart_restores_tasks_from_file() {
    let ctx = TestContext::new();
    let path = ctx.get_data_dir().unwrap().join("lania.txt");

    {
        let (mut session, notices) =
            Session::open(Box::new(LocalStorage::new(&path)), CorruptRecordPolicy::Skip);
        assert!(notices.is_empty());
        session.handle("todo read book");
        session.handle("event party /at 25-08-2021 20:00");
        session.handle("done 2");
        // No `bye`: durability does not depend on it
    }

    let (session, notices) =
        Session::open(Box::new(LocalStorage::new(&path)), CorruptRecordPolicy::Skip);
    assert!(notices.is_empty());
    assert_eq!(session.tasks().len(), 2);
    assert_eq!(
        session.tasks().get(2).unwrap().to_string(),
        "[E][X] party (at: Aug 25 2021 8:00PM)"
    );
}

#[test]
fn test_open_reports_corrupt_lines() {
    let ctx = TestContext::new();
    let path = ctx.get_data_dir().unwrap().join("lania.txt");
    fs::write(&path, "T | 0 | ok\ngarbage\n").unwrap();

    let (session, notices) =
        Session::open(Box::new(LocalStorage::new(&path)), CorruptRecordPolicy::Skip);
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("line 2"));

    let (session, notices) =
        Session::open(Box::new(LocalStorage::new(&path)), CorruptRecordPolicy::Abort);
    assert!(session.tasks().is_empty());
    assert!(notices[0].starts_with("Lania could not load your saved tasks"));
}

#[test]
fn test_open_with_missing_file_is_quiet() {
    let ctx = TestContext::new();
    let path = ctx.get_data_dir().unwrap().join("missing.txt");
    let (session, notices) =
        Session::open(Box::new(LocalStorage::new(&path)), CorruptRecordPolicy::Abort);
    assert!(session.tasks().is_empty());
    assert!(notices.is_empty());
    assert!(session.is_running());
}

#[test]
fn test_short_date_fields_are_rejected_without_mutation() {
    let (mut session, memory) = shared_session();
    let reply = session.handle("deadline x /by 1-8-2021 6:00");
    assert!(reply.contains("Invalid date format"));
    assert!(session.tasks().is_empty());
    assert!(memory.lines().is_empty());
}
