use crate::app::{Event, Outcome};
use crate::graph::TreeRow;
use crate::models::{format_deadline, Goal, Task};
use crate::views::goals::GoalCard;
use crate::views::now::ActionGroup;
use crate::views::stats::DayCount;

fn check(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

fn deadline_suffix(t: &Task) -> String {
    t.deadline
        .as_ref()
        .map(|d| format!("  (due {})", format_deadline(d)))
        .unwrap_or_default()
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    println!("  Status: {}", if t.completed { "completed" } else { "open" });
    if let Some(ref parent) = t.parent_id {
        println!("  Parent: {parent}");
    }
    if let Some(ref deadline) = t.deadline {
        println!("  Deadline: {}", format_deadline(deadline));
    }
    if let Some(ref completed) = t.completed_at {
        println!("  Completed: {}", completed.to_rfc3339());
    }
}

pub fn print_task_list(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        println!("  {} {} ({}){}", check(t.completed), t.title, t.id, deadline_suffix(t));
    }
}

pub fn print_tree(rows: &[TreeRow]) {
    if rows.is_empty() {
        println!("No tasks found.");
        return;
    }
    // Whether the ancestor at each level below the root was a last sibling.
    let mut lasts: Vec<bool> = Vec::new();
    for row in rows {
        lasts.truncate(row.depth.saturating_sub(1));
        if row.depth > 0 {
            lasts.push(row.is_last);
        }
        let mut prefix = String::new();
        for (level, &last) in lasts.iter().enumerate() {
            let glyph = match (level + 1 == lasts.len(), last) {
                (true, true) => "└── ",
                (true, false) => "├── ",
                (false, true) => "    ",
                (false, false) => "│   ",
            };
            prefix.push_str(glyph);
        }
        println!(
            "{prefix}{} {} ({}){}",
            check(row.task.completed),
            row.task.title,
            row.task.id,
            deadline_suffix(row.task)
        );
    }
}

pub fn print_action_groups(groups: &[ActionGroup], points: u64) {
    let count: usize = groups.iter().map(|g| g.items.len()).sum();
    println!("{count} actionable now / {points} pt");
    if groups.is_empty() {
        println!("Nothing is actionable. Try splitting a larger task into subtasks.");
        return;
    }
    for g in groups {
        match g.parent {
            Some(p) => println!("\n{} ({})", g.heading(), p.id),
            None => println!("\n{}", g.heading()),
        }
        for t in &g.items {
            println!("  [ ] {} ({}){}", t.title, t.id, deadline_suffix(t));
        }
    }
}

pub fn print_log(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("No completed tasks yet.");
        return;
    }
    for t in tasks {
        let at = t
            .completed_at
            .map(|at| at.with_timezone(&chrono::Local).format("%y/%m/%d %H:%M").to_string())
            .unwrap_or_default();
        println!("  {at}  {} ({})", t.title, t.id);
    }
}

pub fn print_week(label: &str, days: &[DayCount]) {
    let total: usize = days.iter().map(|d| d.count).sum();
    println!("Week {label}: {total} completed");
    for d in days {
        println!("  {}  {:>3} {}", d.date.format("%m/%d"), d.count, "#".repeat(d.count));
    }
}

pub fn print_goal(g: &Goal) {
    let next = crate::rules::next_actionable_milestone(g);
    println!("{} {} ({})  {}%", check(g.completed), g.title, g.id, g.progress_percent());
    for m in &g.milestones {
        let marker = if next == Some(m.id.as_str()) { "  <- next" } else { "" };
        println!("    {} {} ({}){marker}", check(m.completed), m.title, m.id);
    }
}

pub fn print_goal_board(cards: &[GoalCard]) {
    if cards.is_empty() {
        println!("No goals found.");
        return;
    }
    for card in cards {
        print_goal(card.goal);
    }
}

pub fn print_outcome(verb: &str, o: &Outcome) {
    match o.transition {
        Some(t) if t.is_completion() => println!("Completed: {} ({})", o.title, o.id),
        Some(_) => println!("Reopened: {} ({})", o.title, o.id),
        None => println!("{verb}: {} ({})", o.title, o.id),
    }
    if o.auto_closed {
        println!("All milestones done, goal completed.");
    }
    for event in &o.events {
        match event {
            Event::Celebrate { transition, .. } => {
                println!("Nice work! +{} pt", transition.points_delta())
            }
        }
    }
    if o.transition.is_some() {
        println!("Points: {}", o.points);
    }
}
