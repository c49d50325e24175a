use serde::{Deserialize, Serialize};

use crate::error::TasquestError;
use crate::models::{Goal, Task};

/// The whole persisted application state. Written out in full on every save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub points: u64,
}

impl Document {
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Resolve a task by exact id or unique id prefix.
    pub fn resolve_task(&self, reference: &str) -> Result<usize, TasquestError> {
        super::resolve_index(
            &self.tasks,
            reference,
            |t| t.id.as_str(),
            |t| t.title.as_str(),
            TasquestError::task_not_found,
        )
    }

    pub fn resolve_goal(&self, reference: &str) -> Result<usize, TasquestError> {
        super::resolve_index(
            &self.goals,
            reference,
            |g| g.id.as_str(),
            |g| g.title.as_str(),
            TasquestError::goal_not_found,
        )
    }

    /// Whether any task, goal or milestone already uses `id`.
    pub fn id_taken(&self, id: &str) -> bool {
        self.tasks.iter().any(|t| t.id == id)
            || self
                .goals
                .iter()
                .any(|g| g.id == id || g.milestones.iter().any(|m| m.id == id))
    }
}
