//! Full board lifecycle against an in-memory store: load, add, toggle,
//! edit, filter, delete.

use anyhow::{Result, bail};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;
use taskdeck_core::{NewTask, Priority, Task, TaskDraft, TaskFilter};
use taskdeck_store::{Board, TaskStore};

#[derive(Default)]
struct InMemoryStore {
    inner: Mutex<Collection>,
}

#[derive(Default)]
struct Collection {
    tasks: Vec<Task>,
    next_id: u32,
}

impl TaskStore for &InMemoryStore {
    async fn list(&self) -> Result<Vec<Task>> {
        Ok(self.inner.lock().unwrap().tasks.clone())
    }

    async fn create(&self, new: &NewTask) -> Result<Task> {
        let mut c = self.inner.lock().unwrap();
        c.next_id += 1;
        let task = Task {
            id: c.next_id.to_string(),
            title: new.title.clone(),
            description: new.description.clone(),
            completed: new.completed,
            priority: new.priority,
            created_at: new.created_at,
        };
        c.tasks.push(task.clone());
        Ok(task)
    }

    async fn replace(&self, id: &str, task: &Task) -> Result<Task> {
        let mut c = self.inner.lock().unwrap();
        let Some(pos) = c.tasks.iter().position(|t| t.id == id) else {
            bail!("HTTP 404");
        };
        c.tasks[pos] = task.clone();
        Ok(task.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.inner.lock().unwrap().tasks.retain(|t| t.id != id);
        Ok(())
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 19, 12, 0, 0).unwrap()
}

fn draft(title: &str, priority: Priority) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: String::new(),
        priority,
    }
}

#[tokio::test]
async fn add_toggle_edit_delete_lifecycle() {
    let store = InMemoryStore::default();
    let mut board = Board::new(&store);

    assert!(board.refresh(now()).await);
    assert!(board.tasks().is_empty());

    // Create two tasks; ids come from the store.
    assert!(board.add(&draft("Buy milk", Priority::Low), now()).await);
    assert!(board.add(&draft("Pay rent", Priority::High), now()).await);
    assert_eq!(board.tasks().len(), 2);
    assert_eq!(board.tasks()[0].id, "1");
    assert_eq!(board.tasks()[1].id, "2");

    // Complete one; filters now split the cache.
    assert!(board.toggle_completed("1", now()).await);
    board.set_filter(TaskFilter::Completed);
    assert_eq!(board.filtered_tasks().len(), 1);
    assert_eq!(board.filtered_tasks()[0].id, "1");
    board.set_filter(TaskFilter::Active);
    assert_eq!(board.filtered_tasks().len(), 1);
    assert_eq!(board.filtered_tasks()[0].id, "2");

    // Edit the active one through a session.
    assert!(board.begin_edit("2"));
    {
        let session = board.editing_mut().unwrap();
        session.draft.title = "Pay rent (March)".to_string();
        session.draft.description = "transfer before the 5th".to_string();
    }
    assert!(board.commit_edit(now()).await);
    assert!(board.editing().is_none());

    // The write landed remotely: a wholesale refresh sees the same state.
    board.set_filter(TaskFilter::All);
    assert!(board.refresh(now()).await);
    let renamed = board.tasks().iter().find(|t| t.id == "2").unwrap();
    assert_eq!(renamed.title, "Pay rent (March)");
    assert_eq!(renamed.description, "transfer before the 5th");

    // Delete the completed one.
    assert!(board.remove("1", now()).await);
    assert_eq!(board.tasks().len(), 1);
    assert!(board.refresh(now()).await);
    assert_eq!(board.tasks().len(), 1);
    assert_eq!(board.tasks()[0].id, "2");
}
