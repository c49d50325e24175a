use serde_json::{json, Value};

use crate::app::Outcome;
use crate::error::TasquestError;
use crate::models::{format_deadline, Goal, Milestone, Task};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TasquestError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "parent_id": t.parent_id,
        "deadline": t.deadline.as_ref().map(format_deadline),
        "completed": t.completed,
        "completed_at": t.completed_at.map(|at| at.to_rfc3339()),
    })
}

pub fn milestone_json(m: &Milestone, next: Option<&str>) -> Value {
    json!({
        "id": m.id,
        "title": m.title,
        "completed": m.completed,
        "completed_at": m.completed_at.map(|at| at.to_rfc3339()),
        "actionable": next == Some(m.id.as_str()),
    })
}

pub fn goal_json(g: &Goal) -> Value {
    let next = crate::rules::next_actionable_milestone(g);
    json!({
        "id": g.id,
        "title": g.title,
        "completed": g.completed,
        "created_at": g.created_at.to_rfc3339(),
        "progress": g.progress_percent(),
        "next_milestone": next,
        "can_complete": g.all_milestones_completed(),
        "milestones": g.milestones.iter().map(|m| milestone_json(m, next)).collect::<Vec<_>>(),
    })
}

pub fn outcome_json(o: &Outcome) -> Value {
    json!({
        "id": o.id,
        "title": o.title,
        "transition": o.transition.map(|t| t.as_str()),
        "auto_closed": o.auto_closed,
        "points": o.points,
        "events": o.events,
    })
}
