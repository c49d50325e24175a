use serde_json::json;

use crate::cli::{finish, print_json, Context};
use crate::error::TasquestError;
use crate::output;
use crate::views::log::completed_log;

pub fn run(ctx: &Context) -> i32 {
    finish(run_inner(ctx), ctx.json)
}

fn run_inner(ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let done = completed_log(&app.document().tasks);

    if ctx.json {
        let tasks_json: Vec<_> = done.iter().map(|t| output::json::task_json(t)).collect();
        print_json(&output::json::success(json!({ "tasks": tasks_json })));
    } else {
        output::text::print_log(&done);
    }
    app.close();
    Ok(0)
}
