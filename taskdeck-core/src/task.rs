//! Task model shared between the board controller and the remote store.
//!
//! The wire format is the remote collection's JSON: camelCase field names,
//! lowercase priority values, ISO 8601 `createdAt`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Display label (Spanish, matching the board UI language).
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Baja",
            Self::Medium => "Media",
            Self::High => "Alta",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }
}

/// A task record as stored in the remote collection.
///
/// `id` is assigned by the remote store only; nothing in this crate ever
/// generates one locally. `description` is optional on the wire — the store
/// sends an empty string when blank, so we keep a plain `String` and treat
/// empty as absent for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

/// Create payload: a full task minus the server-assigned `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    /// Build a create payload from validated fields at `now`.
    pub fn at(title: String, description: String, priority: Priority, now: DateTime<Utc>) -> Self {
        Self {
            title,
            description,
            completed: false,
            priority,
            created_at: now,
        }
    }
}

/// Unvalidated form input for the add form and the edit modal.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
        }
    }
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
        }
    }

    /// Trim both text fields and reject an empty title.
    ///
    /// Returns `(title, description)` ready for persistence. A `None` here is
    /// the validation gate: callers must not issue any network call for it.
    pub fn cleaned(&self) -> Option<(String, String)> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        Some((title.to_string(), self.description.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn wire_format_is_camel_case_with_lowercase_priority() {
        let t = Task {
            id: "7".to_string(),
            title: "Buy milk".to_string(),
            description: String::new(),
            completed: false,
            priority: Priority::Low,
            created_at: Utc.with_ymd_and_hms(2026, 2, 19, 12, 0, 0).unwrap(),
        };
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["priority"], "low");
        assert!(v.get("createdAt").is_some());
        assert!(v.get("created_at").is_none());
    }

    #[test]
    fn task_round_trips_without_description() {
        let json = r#"{"id":"3","title":"x","completed":true,"priority":"high","createdAt":"2026-02-19T12:00:00Z"}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.description, "");
        assert!(t.completed);
        assert_eq!(t.priority, Priority::High);
    }

    #[test]
    fn cleaned_rejects_blank_title() {
        let mut d = TaskDraft::default();
        d.title = "   ".to_string();
        d.description = "something".to_string();
        assert!(d.cleaned().is_none());
    }

    #[test]
    fn cleaned_trims_both_fields() {
        let d = TaskDraft {
            title: "  Buy milk  ".to_string(),
            description: " 2% \n".to_string(),
            priority: Priority::Low,
        };
        let (title, description) = d.cleaned().unwrap();
        assert_eq!(title, "Buy milk");
        assert_eq!(description, "2%");
    }

    #[test]
    fn priority_cycle_covers_all_variants() {
        assert_eq!(Priority::Low.next(), Priority::Medium);
        assert_eq!(Priority::High.next(), Priority::Low);
        for p in Priority::ALL {
            assert_eq!(p.next().prev(), p);
        }
    }
}
