//! Workflow graph: one node per phase, task and subtask, with dependency and
//! phase-sequence edges.
//!
//! Nodes come out of [`build_nodes`] unpositioned; [`layout::layout`]
//! assigns coordinates. Node and edge JSON follows the shape ReactFlow-style
//! canvases consume (`type`, `parentNode`, `data.label`, ...).

pub mod layout;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{Phase, PlanDocument, Status, Subtask, SubtaskId, Task};

/// Stroke for a dependency whose prerequisite is still open.
pub const PENDING_DEPENDENCY_STROKE: &str = "#f59e0b";
/// Stroke for a dependency whose prerequisite is completed.
pub const MET_DEPENDENCY_STROKE: &str = "#22c55e";
pub const SEQUENCE_STROKE: &str = "#94a3b8";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Phase,
    Task,
    Subtask,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Display payload of a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Entity title
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: Status,
    /// Plan identifier of the entity (`0`, `0.1`, `0.1.1`)
    #[serde(rename = "planId")]
    pub source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_criteria: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    #[serde(rename = "parentNode", default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub data: NodeData,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Prerequisite → subtask
    Dependency,
    /// Phase → next phase
    Sequence,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    /// Set while the dependency is unmet
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub animated: bool,
    pub style: EdgeStyle,
}

/// Which entities and fields end up in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphOptions {
    pub include_completed: bool,
    pub include_success_criteria: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            include_completed: true,
            include_success_criteria: false,
        }
    }
}

impl GraphOptions {
    pub fn with_include_completed(mut self, include: bool) -> Self {
        self.include_completed = include;
        self
    }

    pub fn with_success_criteria(mut self, include: bool) -> Self {
        self.include_success_criteria = include;
        self
    }

    fn keeps(&self, subtask: &Subtask) -> bool {
        self.include_completed || !subtask.completed
    }
}

pub fn phase_node_id(number: u32) -> String {
    format!("phase-{number}")
}

pub fn task_node_id(task: &Task) -> String {
    format!("task-{}", task.id)
}

pub fn subtask_node_id(id: &SubtaskId) -> String {
    format!("subtask-{id}")
}

fn non_empty(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}

fn phase_node(phase: &Phase) -> WorkflowNode {
    WorkflowNode {
        id: phase_node_id(phase.number),
        kind: NodeKind::Phase,
        position: Position::default(),
        parent: None,
        data: NodeData {
            label: phase.title.clone(),
            description: non_empty(&phase.goal),
            status: phase.status(),
            source_id: phase.number.to_string(),
            duration: phase.duration.clone(),
            success_criteria: None,
        },
    }
}

fn task_node(phase: &Phase, task: &Task) -> WorkflowNode {
    WorkflowNode {
        id: task_node_id(task),
        kind: NodeKind::Task,
        position: Position::default(),
        parent: Some(phase_node_id(phase.number)),
        data: NodeData {
            label: task.title.clone(),
            description: non_empty(&task.goal),
            status: task.status(),
            source_id: task.id.to_string(),
            duration: None,
            success_criteria: None,
        },
    }
}

fn subtask_node(task: &Task, subtask: &Subtask, options: &GraphOptions) -> WorkflowNode {
    WorkflowNode {
        id: subtask_node_id(&subtask.id),
        kind: NodeKind::Subtask,
        position: Position::default(),
        parent: Some(task_node_id(task)),
        data: NodeData {
            label: subtask.title.clone(),
            description: non_empty(&subtask.description),
            status: subtask.status(),
            source_id: subtask.id.to_string(),
            duration: None,
            success_criteria: options
                .include_success_criteria
                .then(|| subtask.success_criteria.clone()),
        },
    }
}

/// One node per phase, task and subtask, in document order.
///
/// Completed subtasks are left out when `include_completed` is false. Phase
/// and task status is always computed over every descendant, filtered or
/// not.
pub fn build_nodes(plan: &PlanDocument, options: &GraphOptions) -> Vec<WorkflowNode> {
    let mut nodes = Vec::new();
    for phase in &plan.phases {
        nodes.push(phase_node(phase));
        for task in &phase.tasks {
            nodes.push(task_node(phase, task));
            nodes.extend(
                task.subtasks
                    .iter()
                    .filter(|subtask| options.keeps(subtask))
                    .map(|subtask| subtask_node(task, subtask, options)),
            );
        }
    }
    debug!("Built {} nodes for '{}'", nodes.len(), plan.project_name);
    nodes
}

/// Dependency edges (prerequisite → subtask) followed by phase sequence
/// edges.
///
/// A dependency edge is dropped when either end is missing from the plan or
/// filtered out by `options`.
pub fn build_edges(plan: &PlanDocument, options: &GraphOptions) -> Vec<WorkflowEdge> {
    let visible: HashSet<SubtaskId> = plan
        .subtasks()
        .filter(|subtask| options.keeps(subtask))
        .map(|subtask| subtask.id)
        .collect();

    let mut edges = Vec::new();
    for subtask in plan.subtasks().filter(|s| visible.contains(&s.id)) {
        for prerequisite in &subtask.prerequisites {
            if !visible.contains(prerequisite) {
                continue;
            }
            let met = plan.is_completed(prerequisite);
            edges.push(WorkflowEdge {
                id: format!("dep-{prerequisite}-{}", subtask.id),
                source: subtask_node_id(prerequisite),
                target: subtask_node_id(&subtask.id),
                kind: EdgeKind::Dependency,
                animated: !met,
                style: EdgeStyle {
                    stroke: if met {
                        MET_DEPENDENCY_STROKE
                    } else {
                        PENDING_DEPENDENCY_STROKE
                    }
                    .to_string(),
                    stroke_dasharray: None,
                },
            });
        }
    }

    for pair in plan.phases.windows(2) {
        let (source, target) = (phase_node_id(pair[0].number), phase_node_id(pair[1].number));
        edges.push(WorkflowEdge {
            id: format!("seq-{source}-{target}"),
            source,
            target,
            kind: EdgeKind::Sequence,
            animated: false,
            style: EdgeStyle {
                stroke: SEQUENCE_STROKE.to_string(),
                stroke_dasharray: Some("5,5".to_string()),
            },
        });
    }

    debug!("Built {} edges for '{}'", edges.len(), plan.project_name);
    edges
}
