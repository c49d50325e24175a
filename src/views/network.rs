use std::collections::HashSet;
use std::fmt::Write;

use serde::Serialize;

use crate::models::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub completed: bool,
}

/// Parent → child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskGraph<'a> {
    pub nodes: Vec<GraphNode<'a>>,
    pub edges: Vec<GraphEdge<'a>>,
}

/// Nodes for every task and an edge for every parent link whose parent exists.
pub fn task_graph(tasks: &[Task]) -> TaskGraph<'_> {
    let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let nodes = tasks
        .iter()
        .map(|t| GraphNode {
            id: &t.id,
            label: &t.title,
            completed: t.completed,
        })
        .collect();
    let edges = tasks
        .iter()
        .filter_map(|t| {
            let parent = t.parent_id.as_deref()?;
            ids.contains(parent).then_some(GraphEdge {
                source: parent,
                target: &t.id,
            })
        })
        .collect();
    TaskGraph { nodes, edges }
}

impl TaskGraph<'_> {
    /// Graphviz rendering; completed tasks are filled green, open ones blue.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph tasks {\n    node [shape=circle, style=filled];\n");
        for n in &self.nodes {
            let color = if n.completed { "#22c55e" } else { "#60a5fa" };
            let _ = writeln!(
                out,
                "    \"{}\" [label=\"{}\", fillcolor=\"{}\"];",
                escape(n.id),
                escape(n.label),
                color
            );
        }
        for e in &self.edges {
            let _ = writeln!(out, "    \"{}\" -> \"{}\";", escape(e.source), escape(e.target));
        }
        out.push_str("}\n");
        out
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
