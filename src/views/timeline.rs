use crate::graph::{children_index, descendants};
use crate::models::Task;

use super::deadline_desc;

/// All descendants of `id`, latest deadline first and undated tasks last.
pub fn timeline<'a>(id: &str, tasks: &'a [Task]) -> Vec<&'a Task> {
    let index = children_index(tasks);
    let mut out = descendants(id, &index);
    out.sort_by(|a, b| deadline_desc(a.deadline.as_ref(), b.deadline.as_ref()));
    out
}
