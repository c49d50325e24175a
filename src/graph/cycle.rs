use std::collections::{HashMap, HashSet};

use crate::error::TasquestError;
use crate::models::Task;

/// Check whether `candidate_parent_id` may become the parent of `task_id`.
///
/// Walks parent links upward from the candidate. Returns false if the walk
/// reaches `task_id` (or starts there), since the new link would close a loop.
/// A visited set bounds the walk even if stored links already contain a cycle.
pub fn can_assign_parent(task_id: &str, candidate_parent_id: &str, all_tasks: &[Task]) -> bool {
    if task_id == candidate_parent_id {
        return false;
    }

    let parents: HashMap<&str, &str> = all_tasks
        .iter()
        .filter_map(|t| t.parent_id.as_deref().map(|p| (t.id.as_str(), p)))
        .collect();

    let mut visited = HashSet::new();
    let mut current = candidate_parent_id;
    while visited.insert(current) {
        match parents.get(current) {
            Some(&p) if p == task_id => return false,
            Some(&p) => current = p,
            None => return true,
        }
    }
    // Stored links already loop without passing through task_id.
    true
}

/// Like [`can_assign_parent`] but as a `Result` for the mutation path.
pub fn check_parent(
    task_id: &str,
    candidate_parent_id: &str,
    all_tasks: &[Task],
) -> Result<(), TasquestError> {
    if can_assign_parent(task_id, candidate_parent_id, all_tasks) {
        Ok(())
    } else {
        Err(TasquestError::cycle_detected(task_id, candidate_parent_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, parent: Option<&str>) -> Task {
        Task::new(id.into(), id, parent.map(String::from), None)
    }

    #[test]
    fn test_no_cycle() {
        let tasks = vec![task("a", None), task("b", Some("a")), task("c", Some("b"))];
        assert!(can_assign_parent("c", "a", &tasks));
        assert!(can_assign_parent("a", "x", &tasks));
    }

    #[test]
    fn test_cycle() {
        let tasks = vec![task("a", None), task("b", Some("a")), task("c", Some("b"))];
        assert!(!can_assign_parent("a", "c", &tasks));
        assert!(!can_assign_parent("a", "b", &tasks));
        assert!(check_parent("b", "c", &tasks).is_err());
    }

    #[test]
    fn test_self_cycle() {
        let tasks = vec![task("a", None)];
        assert!(!can_assign_parent("a", "a", &tasks));
    }

    #[test]
    fn test_existing_loop_terminates() {
        let tasks = vec![task("x", Some("y")), task("y", Some("x")), task("a", None)];
        assert!(can_assign_parent("a", "x", &tasks));
    }
}
