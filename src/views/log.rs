use crate::models::Task;

/// Completed tasks that carry a completion time, most recent first.
pub fn completed_log(tasks: &[Task]) -> Vec<&Task> {
    let mut out: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.completed && t.completed_at.is_some())
        .collect();
    out.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn newest_first_and_skips_untimed() {
        let mut tasks = Vec::new();
        for (id, day) in [("a", Some(1)), ("b", Some(3)), ("c", None), ("d", Some(2))] {
            let mut t = Task::new(id.into(), id, None, None);
            t.completed = true;
            t.completed_at = day.map(|d| Utc.with_ymd_and_hms(2025, 5, d, 9, 0, 0).unwrap());
            tasks.push(t);
        }
        tasks.push(Task::new("open".into(), "open", None, None));
        let ids: Vec<&str> = completed_log(&tasks).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "a"]);
    }
}
