pub mod gate;
pub mod scoring;

pub use gate::{
    next_actionable_milestone, toggle_goal_completion, toggle_milestone_completion,
    toggle_task_completion, MilestoneToggle, TaskToggle,
};
pub use scoring::Transition;
