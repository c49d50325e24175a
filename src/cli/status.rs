use serde_json::json;

use crate::cli::{finish, print_json, Context};
use crate::error::TasquestError;
use crate::output;
use crate::views::now::actionable_tasks;

pub fn run(ctx: &Context) -> i32 {
    finish(run_inner(ctx), ctx.json)
}

fn run_inner(ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let doc = app.document();

    let total = doc.tasks.len();
    let completed = doc.tasks.iter().filter(|t| t.completed).count();
    let actionable = actionable_tasks(&doc.tasks).len();
    let goals_total = doc.goals.len();
    let goals_completed = doc.goals.iter().filter(|g| g.completed).count();
    let steps_ready = app
        .milestone_eligibility()
        .iter()
        .filter(|(_, next)| next.is_some())
        .count();

    if ctx.json {
        print_json(&output::json::success(json!({
            "points": doc.points,
            "tasks": {
                "total": total,
                "completed": completed,
                "open": total - completed,
                "actionable": actionable
            },
            "goals": {
                "total": goals_total,
                "completed": goals_completed,
                "milestones_ready": steps_ready
            }
        })));
    } else {
        println!("Points: {}", doc.points);
        println!("Tasks: {completed}/{total} completed, {actionable} actionable now");
        println!(
            "Goals: {goals_completed}/{goals_total} completed, {steps_ready} with a next milestone"
        );
    }
    app.close();
    Ok(0)
}
