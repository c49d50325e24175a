use std::collections::{HashMap, HashSet};

use crate::models::Task;

/// A task together with its children, rebuilt from the flat collection.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<'a> {
    pub task: &'a Task,
    pub children: Vec<TreeNode<'a>>,
}

/// Parent id → direct children, in flat-collection order.
pub type ChildrenIndex<'a> = HashMap<&'a str, Vec<&'a Task>>;

pub fn children_index(tasks: &[Task]) -> ChildrenIndex<'_> {
    let mut index: ChildrenIndex = HashMap::new();
    for task in tasks {
        if let Some(parent) = task.parent_id.as_deref() {
            index.entry(parent).or_default().push(task);
        }
    }
    index
}

/// Rebuild the forest. Tasks whose parent is absent from `tasks` become roots.
///
/// Sibling order follows the flat collection. Tasks stuck in a parent loop are
/// unreachable from any root; they are promoted to roots so every task still
/// appears exactly once.
pub fn build_forest(tasks: &[Task]) -> Vec<TreeNode<'_>> {
    let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let index = children_index(tasks);
    let mut placed = HashSet::new();
    let mut roots = Vec::new();

    for task in tasks {
        let attached = task
            .parent_id
            .as_deref()
            .is_some_and(|p| ids.contains(p));
        if !attached {
            roots.push(build_node(task, &index, &mut placed));
        }
    }

    for task in tasks {
        if !placed.contains(task.id.as_str()) {
            tracing::warn!(task = %task.id, "parent links form a loop; showing task as a root");
            roots.push(build_node(task, &index, &mut placed));
        }
    }

    roots
}

struct Frame<'a> {
    task: &'a Task,
    children: Vec<TreeNode<'a>>,
    next: usize,
}

impl<'a> Frame<'a> {
    fn new(task: &'a Task) -> Self {
        Self {
            task,
            children: Vec::new(),
            next: 0,
        }
    }
}

/// Depth-first build with an explicit stack; chains of any length are fine.
fn build_node<'a>(
    task: &'a Task,
    index: &ChildrenIndex<'a>,
    placed: &mut HashSet<&'a str>,
) -> TreeNode<'a> {
    placed.insert(task.id.as_str());
    let mut stack = vec![Frame::new(task)];

    while let Some(frame) = stack.last_mut() {
        let kid = index
            .get(frame.task.id.as_str())
            .and_then(|kids| kids.get(frame.next))
            .copied();
        frame.next += 1;

        match kid {
            Some(kid) => {
                if placed.insert(kid.id.as_str()) {
                    stack.push(Frame::new(kid));
                }
            }
            None => {
                let Some(done) = stack.pop() else { break };
                let node = TreeNode {
                    task: done.task,
                    children: done.children,
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => return node,
                }
            }
        }
    }
    TreeNode {
        task,
        children: Vec::new(),
    }
}

impl Drop for TreeNode<'_> {
    // Unlink iteratively so dropping a deep chain does not recurse per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// True if any strict descendant of `id` is incomplete.
pub fn has_open_descendant(id: &str, index: &ChildrenIndex<'_>) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&Task> = index.get(id).cloned().unwrap_or_default();
    while let Some(cur) = stack.pop() {
        if !visited.insert(cur.id.as_str()) {
            continue;
        }
        if !cur.completed {
            return true;
        }
        if let Some(kids) = index.get(cur.id.as_str()) {
            stack.extend(kids.iter().copied());
        }
    }
    false
}

/// Every strict descendant of `id`, pre-order.
pub fn descendants<'a>(id: &str, index: &ChildrenIndex<'a>) -> Vec<&'a Task> {
    let mut out = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(id);
    let mut stack: Vec<&'a Task> = index
        .get(id)
        .map(|k| k.iter().rev().copied().collect())
        .unwrap_or_default();
    while let Some(cur) = stack.pop() {
        if !visited.insert(cur.id.as_str()) {
            continue;
        }
        out.push(cur);
        if let Some(kids) = index.get(cur.id.as_str()) {
            stack.extend(kids.iter().rev().copied());
        }
    }
    out
}

/// One line of a rendered tree.
#[derive(Debug, Clone)]
pub struct TreeRow<'a> {
    pub task: &'a Task,
    pub depth: usize,
    /// Last visible sibling under its parent.
    pub is_last: bool,
    pub has_children: bool,
}

/// Pre-order rows for display. `keep` prunes a node together with its subtree.
pub fn flatten<'a>(forest: &[TreeNode<'a>], keep: &dyn Fn(&Task) -> bool) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::new();
    let mut stack = Vec::new();
    push_visible(&mut stack, forest, 0, keep);
    while let Some((node, depth, is_last)) = stack.pop() {
        rows.push(TreeRow {
            task: node.task,
            depth,
            is_last,
            has_children: node.children.iter().any(|c| keep(c.task)),
        });
        push_visible(&mut stack, &node.children, depth + 1, keep);
    }
    rows
}

/// Push kept siblings in reverse so they pop in collection order.
fn push_visible<'n, 'a>(
    stack: &mut Vec<(&'n TreeNode<'a>, usize, bool)>,
    nodes: &'n [TreeNode<'a>],
    depth: usize,
    keep: &dyn Fn(&Task) -> bool,
) {
    let visible: Vec<&TreeNode<'a>> = nodes.iter().filter(|n| keep(n.task)).collect();
    let count = visible.len();
    stack.extend(
        visible
            .into_iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (node, depth, i + 1 == count)),
    );
}
