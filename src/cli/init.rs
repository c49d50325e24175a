use serde_json::json;

use crate::cli::{finish, print_json, Context};
use crate::error::TasquestError;
use crate::output;

pub fn run(ctx: &Context) -> i32 {
    finish(run_inner(ctx), ctx.json)
}

fn run_inner(ctx: &Context) -> Result<i32, TasquestError> {
    let store = ctx.store();
    let created = store.ensure_exists()?;
    let path = store.path();

    if ctx.json {
        print_json(&output::json::success(json!({
            "path": path.to_string_lossy(),
            "created": created
        })));
    } else if created {
        println!("Initialized tasquest at {}", path.display());
    } else {
        println!("Already initialized at {}", path.display());
    }
    Ok(0)
}
