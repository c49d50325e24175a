use serde_json::json;

use crate::cli::{finish, print_json, Context};
use crate::error::TasquestError;
use crate::output;
use crate::views::now::{actionable_tasks, group_by_parent};

pub fn run(ctx: &Context) -> i32 {
    finish(run_inner(ctx), ctx.json)
}

fn run_inner(ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let doc = app.document();
    let actionable = actionable_tasks(&doc.tasks);
    let groups = group_by_parent(&doc.tasks, &actionable);

    if ctx.json {
        let groups_json: Vec<_> = groups
            .iter()
            .map(|g| {
                json!({
                    "parent": g.parent.map(output::json::task_json),
                    "tasks": g.items.iter().map(|t| output::json::task_json(t)).collect::<Vec<_>>()
                })
            })
            .collect();
        print_json(&output::json::success(json!({
            "count": actionable.len(),
            "points": doc.points,
            "groups": groups_json
        })));
    } else {
        output::text::print_action_groups(&groups, doc.points);
    }
    app.close();
    Ok(0)
}
