use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TasquestError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Milestone {
    pub fn new(id: String, title: &str) -> Self {
        Self {
            id,
            title: title.trim().to_string(),
            completed: false,
            completed_at: None,
        }
    }
}

/// A long-term objective. Milestones are kept in insertion order and are
/// completed from the last one back to the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(id: String, title: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.trim().to_string(),
            milestones: Vec::new(),
            completed: false,
            created_at,
        }
    }

    /// True when every milestone is completed, including the empty case.
    pub fn all_milestones_completed(&self) -> bool {
        self.milestones.iter().all(|m| m.completed)
    }

    pub fn completed_milestones(&self) -> usize {
        self.milestones.iter().filter(|m| m.completed).count()
    }

    /// Share of completed milestones as a rounded percentage; 0 with no milestones.
    pub fn progress_percent(&self) -> u8 {
        let total = self.milestones.len();
        if total == 0 {
            return 0;
        }
        ((self.completed_milestones() as f64 / total as f64) * 100.0).round() as u8
    }

    pub fn resolve_milestone(&self, reference: &str) -> Result<usize, TasquestError> {
        super::resolve_index(
            &self.milestones,
            reference,
            |m| m.id.as_str(),
            |m| m.title.as_str(),
            TasquestError::milestone_not_found,
        )
    }
}
