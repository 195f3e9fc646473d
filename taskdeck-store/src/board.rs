//! Board controller: the task cache and everything that mutates it.
//!
//! Owns the cache, the active filter, the (at most one) edit session, and a
//! transient notice. Every remote failure is logged, surfaced as a notice,
//! and rolled back where the mutation was optimistic. Nothing here retries:
//! the user re-triggers the action instead.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use taskdeck_core::{BoardView, NewTask, Task, TaskDraft, TaskFilter, project};

use crate::remote::TaskStore;

pub const MSG_LOAD_FAILED: &str = "Error al cargar las tareas";
pub const MSG_CREATE_FAILED: &str = "Error al crear la tarea";
pub const MSG_UPDATE_FAILED: &str = "Error al actualizar la tarea";
pub const MSG_DELETE_FAILED: &str = "Error al eliminar la tarea";
pub const MSG_SAVE_FAILED: &str = "Error al guardar los cambios";
pub const MSG_TITLE_REQUIRED: &str = "Por favor ingresa un título para la tarea";
pub const MSG_TITLE_EMPTY: &str = "El título no puede estar vacío";

/// Transient user-visible message; the UI hides it after a fixed interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// One task being edited, keyed by id, with in-progress field values.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub task_id: String,
    pub draft: TaskDraft,
}

pub struct Board<S> {
    store: S,
    tasks: Vec<Task>,
    filter: TaskFilter,
    editing: Option<EditSession>,
    notice: Option<Notice>,
}

impl<S: TaskStore> Board<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            filter: TaskFilter::All,
            editing: None,
            notice: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks)
    }

    pub fn view(&self, now: DateTime<Utc>, tz: Tz) -> BoardView {
        project(&self.tasks, self.filter, now, tz)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_expired_notice(&mut self, now: DateTime<Utc>, ttl: Duration) {
        if let Some(n) = &self.notice {
            if now - n.raised_at >= ttl {
                self.notice = None;
            }
        }
    }

    fn raise(&mut self, message: &str, now: DateTime<Utc>) {
        self.notice = Some(Notice {
            message: message.to_string(),
            raised_at: now,
        });
    }

    fn fail(&mut self, message: &str, err: &anyhow::Error, now: DateTime<Utc>) {
        tracing::error!(error = %format!("{err:#}"), "{message}");
        self.raise(message, now);
    }

    /// Replace the cache wholesale. A failure leaves the prior cache intact.
    pub async fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        match self.store.list().await {
            Ok(tasks) => {
                self.tasks = tasks;
                true
            }
            Err(e) => {
                self.fail(MSG_LOAD_FAILED, &e, now);
                false
            }
        }
    }

    /// Create a task from the add form. An empty title is rejected before
    /// any network call is made.
    pub async fn add(&mut self, draft: &TaskDraft, now: DateTime<Utc>) -> bool {
        let Some((title, description)) = draft.cleaned() else {
            self.raise(MSG_TITLE_REQUIRED, now);
            return false;
        };

        let new = NewTask::at(title, description, draft.priority, now);
        match self.store.create(&new).await {
            Ok(created) => {
                self.tasks.push(created);
                true
            }
            Err(e) => {
                self.fail(MSG_CREATE_FAILED, &e, now);
                false
            }
        }
    }

    /// Delete a task. The yes/no confirmation gate lives in the UI; by the
    /// time this runs the user has already confirmed.
    pub async fn remove(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        match self.store.delete(id).await {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                true
            }
            Err(e) => {
                self.fail(MSG_DELETE_FAILED, &e, now);
                false
            }
        }
    }

    /// Flip `completed` optimistically, persist the full record, and revert
    /// the flag if the persist fails.
    pub async fn toggle_completed(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };

        self.tasks[pos].completed = !self.tasks[pos].completed;
        let optimistic = self.tasks[pos].clone();

        match self.store.replace(id, &optimistic).await {
            Ok(updated) => {
                self.tasks[pos] = updated;
                true
            }
            Err(e) => {
                self.tasks[pos].completed = !self.tasks[pos].completed;
                self.fail(MSG_UPDATE_FAILED, &e, now);
                false
            }
        }
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditSession> {
        self.editing.as_mut()
    }

    /// Open an edit session seeded from the task's current fields. Replaces
    /// any prior session; only one task is edited at a time.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return false;
        };
        self.editing = Some(EditSession {
            task_id: id.to_string(),
            draft: TaskDraft::from_task(task),
        });
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Persist the edit session. An empty title is rejected before any
    /// network call and the session stays open; a remote failure reverts
    /// the applied fields and also keeps the session open.
    pub async fn commit_edit(&mut self, now: DateTime<Utc>) -> bool {
        let Some(session) = &self.editing else {
            return false;
        };
        let Some((title, description)) = session.draft.cleaned() else {
            self.raise(MSG_TITLE_EMPTY, now);
            return false;
        };
        let priority = session.draft.priority;
        let id = session.task_id.clone();

        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            self.editing = None;
            return false;
        };

        let before = self.tasks[pos].clone();
        self.tasks[pos].title = title;
        self.tasks[pos].description = description;
        self.tasks[pos].priority = priority;

        let optimistic = self.tasks[pos].clone();
        match self.store.replace(&id, &optimistic).await {
            Ok(updated) => {
                self.tasks[pos] = updated;
                self.editing = None;
                true
            }
            Err(e) => {
                self.tasks[pos] = before;
                self.fail(MSG_SAVE_FAILED, &e, now);
                false
            }
        }
    }
}
