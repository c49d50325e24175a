use chrono::Local;
use serde_json::json;

use crate::cli::{finish, print_json, Context};
use crate::error::TasquestError;
use crate::output;
use crate::views::stats::{week_label, weekly_completions};

pub fn run(week: u32, ctx: &Context) -> i32 {
    finish(run_inner(week, ctx), ctx.json)
}

fn run_inner(week: u32, ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let today = Local::now().date_naive();
    let days = weekly_completions(&app.document().tasks, today, week, &Local);
    let label = week_label(today, week);

    if ctx.json {
        let total: usize = days.iter().map(|d| d.count).sum();
        print_json(&output::json::success(json!({
            "week": week,
            "label": label,
            "total": total,
            "days": days
        })));
    } else {
        output::text::print_week(&label, &days);
    }
    app.close();
    Ok(0)
}
