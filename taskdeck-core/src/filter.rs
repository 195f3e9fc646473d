//! Display filters over the task cache.
//!
//! `Active` and `Completed` partition the cache; `All` is their union.

use std::str::FromStr;

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn apply<'a>(self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    /// Placeholder shown when the filtered list is empty.
    pub fn empty_state_text(self) -> &'static str {
        match self {
            Self::All => "No hay tareas aún. ¡Crea una para comenzar!",
            Self::Active => "No hay tareas pendientes.",
            Self::Completed => "No hay tareas completadas.",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Todas",
            Self::Active => "Pendientes",
            Self::Completed => "Completadas",
        }
    }
}

impl FromStr for TaskFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => anyhow::bail!("unknown filter: {other} (expected all|active|completed)"),
        }
    }
}
