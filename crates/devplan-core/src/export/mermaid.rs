//! Mermaid flowchart rendering.

use std::{
    collections::{HashMap, HashSet},
    fmt::Write,
};

use crate::{
    graph::{EdgeKind, NodeKind, WorkflowEdge, WorkflowNode},
    models::Status,
};

/// Longest subtask title shown in a node label.
pub const MAX_TITLE_CHARS: usize = 40;

const CLASS_DEFS: &str = "\
    classDef done fill:#dcfce7,stroke:#16a34a,color:#14532d
    classDef todo fill:#f1f5f9,stroke:#64748b,color:#0f172a
";

/// Mermaid-safe identifier for a node id (`subtask-0.1.1` → `subtask_0_1_1`).
fn mermaid_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Escape label text with Mermaid entity codes.
fn escape(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '#' => escaped.push_str("#35;"),
            '"' => escaped.push_str("#quot;"),
            '\\' => escaped.push_str("#92;"),
            '<' => escaped.push_str("#lt;"),
            '>' => escaped.push_str("#gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn truncate(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        title.to_string()
    } else {
        let kept: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
        format!("{}...", kept.trim_end())
    }
}

fn subtask_label(node: &WorkflowNode) -> String {
    let marker = if node.data.status == Status::Completed {
        "DONE"
    } else {
        "TODO"
    };
    escape(&format!(
        "{marker} {}: {}",
        node.data.source_id,
        truncate(&node.data.label)
    ))
}

/// Render nodes and edges as a `flowchart TD` document.
///
/// Each phase becomes a subgraph holding its subtasks. Consecutive subtasks
/// of a task and dependencies inside one phase are drawn as `-->`,
/// dependencies across phases as `-.->`. Phase sequence edges are implied by
/// subgraph order and not drawn.
pub fn to_mermaid(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> String {
    let by_id: HashMap<&str, &WorkflowNode> =
        nodes.iter().map(|node| (node.id.as_str(), node)).collect();
    let phase_of = |node: &WorkflowNode| -> Option<String> {
        let task = by_id.get(node.parent.as_deref()?)?;
        task.parent.clone()
    };

    let mut out = String::from("flowchart TD\n");

    for phase in nodes.iter().filter(|node| node.kind == NodeKind::Phase) {
        let _ = writeln!(
            out,
            "    subgraph {}[\"{}\"]",
            mermaid_id(&phase.id),
            escape(&format!("Phase {}: {}", phase.data.source_id, phase.data.label))
        );
        for subtask in nodes.iter().filter(|node| {
            node.kind == NodeKind::Subtask && phase_of(*node).as_deref() == Some(phase.id.as_str())
        }) {
            let _ = writeln!(
                out,
                "        {}[\"{}\"]",
                mermaid_id(&subtask.id),
                subtask_label(subtask)
            );
        }
        out.push_str("    end\n");
    }

    let mut drawn: HashSet<(&str, &str)> = HashSet::new();
    let mut links = Vec::new();

    let mut previous: Option<&WorkflowNode> = None;
    for node in nodes.iter().filter(|node| node.kind == NodeKind::Subtask) {
        if let Some(prev) = previous {
            if prev.parent == node.parent && drawn.insert((prev.id.as_str(), node.id.as_str())) {
                links.push(format!("{} --> {}", mermaid_id(&prev.id), mermaid_id(&node.id)));
            }
        }
        previous = Some(node);
    }

    for edge in edges.iter().filter(|edge| edge.kind == EdgeKind::Dependency) {
        let (Some(source), Some(target)) = (
            by_id.get(edge.source.as_str()),
            by_id.get(edge.target.as_str()),
        ) else {
            continue;
        };
        if !drawn.insert((source.id.as_str(), target.id.as_str())) {
            continue;
        }
        let arrow = if phase_of(*source) == phase_of(*target) {
            "-->"
        } else {
            "-.->"
        };
        links.push(format!(
            "{} {arrow} {}",
            mermaid_id(&source.id),
            mermaid_id(&target.id)
        ));
    }

    for link in &links {
        let _ = writeln!(out, "    {link}");
    }

    out.push_str(CLASS_DEFS);
    let (done, todo): (Vec<&WorkflowNode>, Vec<&WorkflowNode>) = nodes
        .iter()
        .filter(|node| node.kind == NodeKind::Subtask)
        .partition(|node| node.data.status == Status::Completed);
    for (class, members) in [("done", done), ("todo", todo)] {
        if members.is_empty() {
            continue;
        }
        let ids: Vec<String> = members.iter().map(|node| mermaid_id(&node.id)).collect();
        let _ = writeln!(out, "    class {} {class}", ids.join(","));
    }

    out
}
