use chrono::NaiveDateTime;
use serde_json::json;

use crate::app::{Intent, TaskEdit};
use crate::cli::commands::TaskCommands;
use crate::cli::{finish, print_json, Context};
use crate::error::TasquestError;
use crate::graph::{children_index, flatten, has_open_descendant};
use crate::models::{parse_deadline, Task};
use crate::output;
use crate::views::timeline::timeline;

pub fn run(cmd: TaskCommands, ctx: &Context) -> i32 {
    let result = match cmd {
        TaskCommands::Add { title, parent, deadline } => {
            run_add(title, parent, deadline.as_deref(), ctx)
        }
        TaskCommands::Edit {
            id,
            title,
            deadline,
            clear_deadline,
            parent,
            root,
        } => {
            let deadline = match (deadline, clear_deadline) {
                (_, true) => Ok(Some(None)),
                (Some(raw), false) => parse_deadline_arg(&raw).map(Some),
                (None, false) => Ok(None),
            };
            deadline.and_then(|deadline| {
                let parent_id = if root { Some(None) } else { parent.map(Some) };
                let edit = TaskEdit {
                    title,
                    deadline,
                    parent_id,
                };
                run_intent("Updated", Intent::EditTask { id, edit }, ctx)
            })
        }
        TaskCommands::Delete { id } => run_intent("Deleted", Intent::DeleteTask { id }, ctx),
        TaskCommands::Toggle { id } => run_intent("Toggled", Intent::ToggleTask { id }, ctx),
        TaskCommands::List => run_list(ctx),
        TaskCommands::Tree { all } => run_tree(all, ctx),
        TaskCommands::Show { id } => run_show(&id, ctx),
        TaskCommands::Timeline { id } => run_timeline(&id, ctx),
    };
    finish(result, ctx.json)
}

fn parse_deadline_arg(raw: &str) -> Result<Option<NaiveDateTime>, TasquestError> {
    match parse_deadline(raw) {
        Some(dt) => Ok(Some(dt)),
        None => Err(TasquestError::validation(format!(
            "Invalid deadline '{raw}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM"
        ))),
    }
}

fn run_add(
    title: String,
    parent: Option<String>,
    deadline: Option<&str>,
    ctx: &Context,
) -> Result<i32, TasquestError> {
    let deadline = match deadline {
        Some(raw) => parse_deadline_arg(raw)?,
        None => None,
    };
    run_intent(
        "Added task",
        Intent::CreateTask {
            title,
            parent_id: parent,
            deadline,
        },
        ctx,
    )
}

/// Dispatch one intent and report the outcome. Shared with the goal commands.
pub(crate) fn run_intent(verb: &str, intent: Intent, ctx: &Context) -> Result<i32, TasquestError> {
    let mut app = ctx.open_app();
    let outcome = app.dispatch(intent)?;
    app.close();

    if ctx.json {
        print_json(&output::json::success(output::json::outcome_json(&outcome)));
    } else {
        output::text::print_outcome(verb, &outcome);
    }
    Ok(0)
}

fn run_list(ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let tasks: Vec<_> = app.document().tasks.iter().collect();

    if ctx.json {
        let tasks_json: Vec<_> = tasks.iter().map(|t| output::json::task_json(t)).collect();
        print_json(&output::json::success(json!({
            "tasks": tasks_json,
            "points": app.document().points
        })));
    } else {
        output::text::print_task_list(&tasks);
    }
    app.close();
    Ok(0)
}

fn run_tree(all: bool, ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let forest = app.forest();
    let rows = flatten(&forest, &|t: &Task| all || !t.completed);

    if ctx.json {
        let rows_json: Vec<_> = rows
            .iter()
            .map(|r| {
                let mut v = output::json::task_json(r.task);
                v["depth"] = json!(r.depth);
                v
            })
            .collect();
        print_json(&output::json::success(json!({ "rows": rows_json })));
    } else {
        output::text::print_tree(&rows);
    }
    drop(rows);
    drop(forest);
    app.close();
    Ok(0)
}

fn run_show(id: &str, ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let doc = app.document();
    let task = &doc.tasks[doc.resolve_task(id)?];
    let index = children_index(&doc.tasks);
    let children = index.get(task.id.as_str()).cloned().unwrap_or_default();
    let blocked = !task.completed && has_open_descendant(&task.id, &index);

    if ctx.json {
        let mut v = output::json::task_json(task);
        v["blocked_by_children"] = json!(blocked);
        v["children"] = json!(children
            .iter()
            .map(|t| output::json::task_json(t))
            .collect::<Vec<_>>());
        print_json(&output::json::success(json!({ "task": v })));
    } else {
        output::text::print_task(task);
        if blocked {
            println!("  Blocked: has incomplete subtasks");
        }
        if !children.is_empty() {
            println!("\nSubtasks:");
            output::text::print_task_list(&children);
        }
    }
    app.close();
    Ok(0)
}

fn run_timeline(id: &str, ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let doc = app.document();
    let task = &doc.tasks[doc.resolve_task(id)?];
    let items = timeline(&task.id, &doc.tasks);

    if ctx.json {
        let tasks_json: Vec<_> = items.iter().map(|t| output::json::task_json(t)).collect();
        print_json(&output::json::success(json!({
            "task": output::json::task_json(task),
            "timeline": tasks_json
        })));
    } else {
        println!("Timeline for {} ({})", task.title, task.id);
        output::text::print_task_list(&items);
    }
    app.close();
    Ok(0)
}
