use serde::Serialize;

/// A successful change of completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    TaskCompleted,
    TaskReopened,
    MilestoneCompleted,
    MilestoneReopened,
    GoalCompleted,
    GoalReopened,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskCompleted => "task_completed",
            Self::TaskReopened => "task_reopened",
            Self::MilestoneCompleted => "milestone_completed",
            Self::MilestoneReopened => "milestone_reopened",
            Self::GoalCompleted => "goal_completed",
            Self::GoalReopened => "goal_reopened",
        }
    }

    /// Signed point change. Only reopening a task takes points away.
    pub fn points_delta(&self) -> i64 {
        match self {
            Self::TaskCompleted | Self::MilestoneCompleted => 1,
            Self::GoalCompleted => 2,
            Self::TaskReopened => -1,
            Self::MilestoneReopened | Self::GoalReopened => 0,
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Self::TaskCompleted | Self::MilestoneCompleted | Self::GoalCompleted
        )
    }
}

/// Apply a transition to the running total, flooring at zero.
pub fn apply(points: u64, transition: Transition) -> u64 {
    let delta = transition.points_delta();
    if delta >= 0 {
        points.saturating_add(delta as u64)
    } else {
        points.saturating_sub(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_round_trip_restores_points() {
        let before = 4;
        let after = apply(apply(before, Transition::TaskCompleted), Transition::TaskReopened);
        assert_eq!(after, before);
    }

    #[test]
    fn points_never_go_negative() {
        assert_eq!(apply(0, Transition::TaskReopened), 0);
    }

    #[test]
    fn milestone_and_goal_awards() {
        assert_eq!(apply(0, Transition::MilestoneCompleted), 1);
        assert_eq!(apply(1, Transition::GoalCompleted), 3);
        assert_eq!(apply(3, Transition::MilestoneReopened), 3);
        assert_eq!(apply(3, Transition::GoalReopened), 3);
    }

    #[test]
    fn completions_are_celebrated() {
        assert!(Transition::TaskCompleted.is_completion());
        assert!(Transition::GoalCompleted.is_completion());
        assert!(!Transition::TaskReopened.is_completion());
    }
}
