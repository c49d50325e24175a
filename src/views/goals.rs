use serde::Serialize;

use crate::models::Goal;
use crate::rules::next_actionable_milestone;

#[derive(Debug, Clone, Serialize)]
pub struct GoalCard<'a> {
    pub goal: &'a Goal,
    pub progress: u8,
    pub next_milestone: Option<&'a str>,
    /// Whether toggling the goal to completed would be accepted.
    pub can_complete: bool,
}

/// Open goals first, then newest first.
pub fn goal_board(goals: &[Goal]) -> Vec<GoalCard<'_>> {
    let mut sorted: Vec<&Goal> = goals.iter().collect();
    sorted.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    sorted
        .into_iter()
        .map(|goal| GoalCard {
            goal,
            progress: goal.progress_percent(),
            next_milestone: next_actionable_milestone(goal),
            can_complete: goal.all_milestones_completed(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Milestone;
    use chrono::{TimeZone, Utc};

    fn goal(id: &str, day: u32, completed: bool) -> Goal {
        let mut g = Goal::new(id.into(), id, Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap());
        g.completed = completed;
        g
    }

    #[test]
    fn open_goals_first_then_newest() {
        let goals = vec![goal("old", 1, false), goal("done", 9, true), goal("new", 5, false)];
        let ids: Vec<&str> = goal_board(&goals).iter().map(|c| c.goal.id.as_str()).collect();
        assert_eq!(ids, ["new", "old", "done"]);
    }

    #[test]
    fn card_reports_progress_and_next_step() {
        let mut g = goal("g", 1, false);
        g.milestones.push(Milestone::new("m1".into(), "800"));
        g.milestones.push(Milestone::new("m2".into(), "700"));
        g.milestones[1].completed = true;
        let goals = vec![g];
        let card = &goal_board(&goals)[0];
        assert_eq!(card.progress, 50);
        assert_eq!(card.next_milestone, Some("m1"));
        assert!(!card.can_complete);
    }
}
