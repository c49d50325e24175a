use std::collections::HashMap;

use crate::graph::{children_index, has_open_descendant};
use crate::models::Task;

use super::deadline_asc;

/// Incomplete tasks with no incomplete descendant, soonest deadline first.
pub fn actionable_tasks(tasks: &[Task]) -> Vec<&Task> {
    let index = children_index(tasks);
    let mut out: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.completed && !has_open_descendant(&t.id, &index))
        .collect();
    out.sort_by(|a, b| deadline_asc(a.deadline.as_ref(), b.deadline.as_ref()));
    out
}

#[derive(Debug, Clone)]
pub struct ActionGroup<'a> {
    /// `None` for tasks without a (live) parent.
    pub parent: Option<&'a Task>,
    pub items: Vec<&'a Task>,
}

impl ActionGroup<'_> {
    pub fn heading(&self) -> &str {
        self.parent.map(|p| p.title.as_str()).unwrap_or("(no parent)")
    }
}

/// Group actionable tasks under their parent. Groups are ordered by their
/// earliest deadline, then by heading.
pub fn group_by_parent<'a>(tasks: &'a [Task], actionable: &[&'a Task]) -> Vec<ActionGroup<'a>> {
    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut groups: Vec<ActionGroup<'a>> = Vec::new();
    let mut slot: HashMap<Option<&str>, usize> = HashMap::new();

    for &task in actionable {
        let parent = task.parent_id.as_deref().and_then(|p| by_id.get(p).copied());
        let key = parent.map(|p| p.id.as_str());
        let i = *slot.entry(key).or_insert_with(|| {
            groups.push(ActionGroup {
                parent,
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[i].items.push(task);
    }

    groups.sort_by(|a, b| {
        let ea = a.items.iter().filter_map(|t| t.deadline.as_ref()).min();
        let eb = b.items.iter().filter_map(|t| t.deadline.as_ref()).min();
        deadline_asc(ea, eb).then_with(|| a.heading().cmp(b.heading()))
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_deadline;

    fn task(id: &str, parent: Option<&str>, deadline: Option<&str>, completed: bool) -> Task {
        let deadline = deadline.and_then(parse_deadline);
        let mut t = Task::new(id.into(), id, parent.map(String::from), deadline);
        t.completed = completed;
        t
    }

    #[test]
    fn leaves_and_unblocked_parents_are_actionable() {
        let tasks = vec![
            task("p", None, None, false),
            task("c1", Some("p"), Some("2025-05-02"), false),
            task("c2", Some("p"), Some("2025-05-01"), false),
            task("q", None, None, false),
            task("qc", Some("q"), None, true),
            task("done", None, None, true),
        ];
        let ids: Vec<&str> = actionable_tasks(&tasks).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["c2", "c1", "q"]);
    }

    #[test]
    fn groups_follow_earliest_deadline_then_title() {
        let tasks = vec![
            task("b", None, None, false),
            task("b1", Some("b"), Some("2025-06-01"), false),
            task("a", None, None, false),
            task("a1", Some("a"), Some("2025-05-01"), false),
            task("loose", None, None, false),
            task("orphan", Some("gone"), None, false),
            task("z", None, None, false),
            task("z1", Some("z"), None, false),
        ];
        let actionable = actionable_tasks(&tasks);
        let groups = group_by_parent(&tasks, &actionable);
        let headings: Vec<&str> = groups.iter().map(|g| g.heading()).collect();
        assert_eq!(headings, ["a", "b", "(no parent)", "z"]);
        let root_items: Vec<&str> = groups[2].items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(root_items, ["loose", "orphan"]);
    }
}
