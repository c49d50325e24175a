use serde_json::json;

use crate::app::Intent;
use crate::cli::commands::{GoalCommands, MilestoneCommands};
use crate::cli::task::run_intent;
use crate::cli::{finish, print_json, Context};
use crate::error::TasquestError;
use crate::output;
use crate::views::goals::goal_board;

pub fn run(cmd: GoalCommands, ctx: &Context) -> i32 {
    let result = match cmd {
        GoalCommands::Add { title } => run_intent("Added goal", Intent::CreateGoal { title }, ctx),
        GoalCommands::Edit { id, title } => {
            run_intent("Updated goal", Intent::EditGoal { id, title }, ctx)
        }
        GoalCommands::Toggle { id } => run_intent("Toggled goal", Intent::ToggleGoal { id }, ctx),
        GoalCommands::List => run_list(ctx),
        GoalCommands::Show { id } => run_show(&id, ctx),
        GoalCommands::Milestone(cmd) => run_milestone(cmd, ctx),
    };
    finish(result, ctx.json)
}

fn run_milestone(cmd: MilestoneCommands, ctx: &Context) -> Result<i32, TasquestError> {
    match cmd {
        MilestoneCommands::Add { goal, title } => run_intent(
            "Added milestone",
            Intent::AddMilestone {
                goal_id: goal,
                title,
            },
            ctx,
        ),
        MilestoneCommands::Edit {
            goal,
            milestone,
            title,
        } => run_intent(
            "Updated milestone",
            Intent::EditMilestone {
                goal_id: goal,
                milestone_id: milestone,
                title,
            },
            ctx,
        ),
        MilestoneCommands::Toggle { goal, milestone } => run_intent(
            "Toggled milestone",
            Intent::ToggleMilestone {
                goal_id: goal,
                milestone_id: milestone,
            },
            ctx,
        ),
    }
}

fn run_list(ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let cards = goal_board(&app.document().goals);

    if ctx.json {
        let goals_json: Vec<_> = cards.iter().map(|c| output::json::goal_json(c.goal)).collect();
        print_json(&output::json::success(json!({ "goals": goals_json })));
    } else {
        output::text::print_goal_board(&cards);
    }
    app.close();
    Ok(0)
}

fn run_show(id: &str, ctx: &Context) -> Result<i32, TasquestError> {
    let app = ctx.open_app();
    let doc = app.document();
    let goal = &doc.goals[doc.resolve_goal(id)?];

    if ctx.json {
        print_json(&output::json::success(json!({
            "goal": output::json::goal_json(goal)
        })));
    } else {
        output::text::print_goal(goal);
    }
    app.close();
    Ok(0)
}
