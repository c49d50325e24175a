use chrono::{DateTime, Utc};

use crate::error::TasquestError;
use crate::graph::{has_open_descendant, ChildrenIndex};
use crate::models::{Goal, Task};
use crate::rules::scoring::Transition;

/// New completion state for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskToggle {
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskToggle {
    pub fn transition(&self) -> Transition {
        if self.completed {
            Transition::TaskCompleted
        } else {
            Transition::TaskReopened
        }
    }

    pub fn apply_to(&self, task: &mut Task) {
        task.completed = self.completed;
        task.completed_at = self.completed_at;
    }
}

/// Flip a task's completion state.
///
/// Reopening is always allowed. Completing requires every descendant to be
/// completed already.
pub fn toggle_task_completion(
    task: &Task,
    index: &ChildrenIndex<'_>,
    now: DateTime<Utc>,
) -> Result<TaskToggle, TasquestError> {
    if task.completed {
        return Ok(TaskToggle {
            completed: false,
            completed_at: None,
        });
    }
    if has_open_descendant(&task.id, index) {
        return Err(TasquestError::blocked_by_descendants(&task.title));
    }
    Ok(TaskToggle {
        completed: true,
        completed_at: Some(now),
    })
}

/// The only milestone that may be completed next: the last incomplete one.
pub fn next_actionable_milestone(goal: &Goal) -> Option<&str> {
    goal.milestones
        .iter()
        .rev()
        .find(|m| !m.completed)
        .map(|m| m.id.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneToggle {
    pub goal: Goal,
    pub transition: Transition,
    /// The goal was closed because its last open milestone was just completed.
    pub auto_closed: bool,
}

/// Flip a milestone's completion state, returning the updated goal.
///
/// Completing is only allowed for [`next_actionable_milestone`]; reopening is
/// allowed for any completed milestone. Completing the last open milestone
/// closes the goal. Reopening never reopens the goal.
pub fn toggle_milestone_completion(
    goal: &Goal,
    milestone_id: &str,
    now: DateTime<Utc>,
) -> Result<MilestoneToggle, TasquestError> {
    let idx = goal
        .milestones
        .iter()
        .position(|m| m.id == milestone_id)
        .ok_or_else(|| TasquestError::milestone_not_found(milestone_id))?;

    let mut updated = goal.clone();

    if goal.milestones[idx].completed {
        let m = &mut updated.milestones[idx];
        m.completed = false;
        m.completed_at = None;
        return Ok(MilestoneToggle {
            goal: updated,
            transition: Transition::MilestoneReopened,
            auto_closed: false,
        });
    }

    match next_actionable_milestone(goal) {
        Some(allowed) if allowed == milestone_id => {}
        allowed => {
            let required = allowed
                .and_then(|id| goal.milestones.iter().find(|m| m.id == id))
                .map(|m| m.title.as_str())
                .unwrap_or("the previous step");
            return Err(TasquestError::out_of_sequence(required));
        }
    }

    let m = &mut updated.milestones[idx];
    m.completed = true;
    m.completed_at = Some(now);

    let auto_closed = !updated.completed && updated.all_milestones_completed();
    if auto_closed {
        updated.completed = true;
    }

    Ok(MilestoneToggle {
        goal: updated,
        transition: Transition::MilestoneCompleted,
        auto_closed,
    })
}

/// Flip a goal's completion state. Closing needs every milestone completed.
pub fn toggle_goal_completion(goal: &Goal) -> Result<(Goal, Transition), TasquestError> {
    let mut updated = goal.clone();
    if goal.completed {
        updated.completed = false;
        return Ok((updated, Transition::GoalReopened));
    }
    if !goal.all_milestones_completed() {
        return Err(TasquestError::blocked_by_milestones(&goal.title));
    }
    updated.completed = true;
    Ok((updated, Transition::GoalCompleted))
}
