use serde_json::json;

use crate::cli::{finish, print_json, Context};
use crate::error::TasquestError;
use crate::output;
use crate::views::network::task_graph;

pub fn run(ctx: &Context) -> i32 {
    finish(run_inner(ctx), ctx.json)
}

fn run_inner(ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let graph = task_graph(&app.document().tasks);

    if ctx.json {
        print_json(&output::json::success(json!({
            "nodes": graph.nodes,
            "edges": graph.edges
        })));
    } else {
        print!("{}", graph.to_dot());
    }
    app.close();
    Ok(0)
}
