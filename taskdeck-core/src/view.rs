//! Board view projection.
//!
//! Pure function of (cache, filter, now, display tz) -> rows. Rows carry
//! plain text only: user-controlled strings pass through literally, and the
//! renderer treats them as raw, uninterpreted text. There is no markup
//! channel, so a title like `<b>x</b>` is displayed exactly as typed.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::filter::TaskFilter;
use crate::task::{Priority, Task};
use crate::time::relative_label;

/// One display row, fully resolved for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    /// `None` when the task has no description text.
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub created_label: String,
}

/// The filtered board: either rows to render, or the filter's placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardView {
    Empty(&'static str),
    Rows(Vec<TaskRow>),
}

impl BoardView {
    pub fn rows(&self) -> &[TaskRow] {
        match self {
            Self::Empty(_) => &[],
            Self::Rows(rows) => rows,
        }
    }
}

pub fn project(tasks: &[Task], filter: TaskFilter, now: DateTime<Utc>, tz: Tz) -> BoardView {
    let visible = filter.apply(tasks);
    if visible.is_empty() {
        return BoardView::Empty(filter.empty_state_text());
    }

    let rows = visible
        .into_iter()
        .map(|t| TaskRow {
            id: t.id.clone(),
            title: t.title.clone(),
            description: if t.description.is_empty() {
                None
            } else {
                Some(t.description.clone())
            },
            completed: t.completed,
            priority: t.priority,
            priority_label: t.priority.label(),
            created_label: relative_label(t.created_at, now, tz),
        })
        .collect();

    BoardView::Rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tz() -> Tz {
        crate::time::parse_tz("America/Chicago").unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 19, 18, 0, 0).unwrap()
    }

    fn task(id: &str, title: &str, completed: bool, priority: Priority) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            completed,
            priority,
            created_at: now(),
        }
    }

    #[test]
    fn incomplete_task_under_completed_filter_shows_placeholder() {
        let tasks = vec![task("1", "Buy milk", false, Priority::Low)];
        let view = project(&tasks, TaskFilter::Completed, now(), tz());
        assert_eq!(view, BoardView::Empty("No hay tareas completadas."));
    }

    #[test]
    fn each_filter_has_its_own_empty_state() {
        let view = project(&[], TaskFilter::All, now(), tz());
        assert_eq!(
            view,
            BoardView::Empty("No hay tareas aún. ¡Crea una para comenzar!")
        );
        let view = project(&[], TaskFilter::Active, now(), tz());
        assert_eq!(view, BoardView::Empty("No hay tareas pendientes."));
    }

    #[test]
    fn markup_in_titles_passes_through_literally() {
        let mut t = task("1", "<b>x</b>", false, Priority::Medium);
        t.description = "<script>alert(1)</script>".to_string();
        let view = project(&[t], TaskFilter::All, now(), tz());
        let rows = view.rows();
        assert_eq!(rows[0].title, "<b>x</b>");
        assert_eq!(rows[0].description.as_deref(), Some("<script>alert(1)</script>"));
    }

    #[test]
    fn empty_description_is_omitted() {
        let tasks = vec![task("1", "x", false, Priority::High)];
        let view = project(&tasks, TaskFilter::All, now(), tz());
        assert_eq!(view.rows()[0].description, None);
    }

    #[test]
    fn priority_labels_are_spanish() {
        let tasks = vec![
            task("1", "a", false, Priority::Low),
            task("2", "b", false, Priority::Medium),
            task("3", "c", false, Priority::High),
        ];
        let view = project(&tasks, TaskFilter::All, now(), tz());
        let labels: Vec<_> = view.rows().iter().map(|r| r.priority_label).collect();
        assert_eq!(labels, ["Baja", "Media", "Alta"]);
    }

    #[test]
    fn rows_follow_the_active_filter() {
        let tasks = vec![
            task("1", "a", false, Priority::Low),
            task("2", "b", true, Priority::Low),
        ];
        let view = project(&tasks, TaskFilter::Active, now(), tz());
        let rows = view.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "1");
        assert!(!rows[0].completed);
    }
}
