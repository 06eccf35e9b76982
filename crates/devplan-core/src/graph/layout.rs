//! Deterministic outline layout.
//!
//! Phases sit in the first column, tasks in the second and subtasks in the
//! third. The first task is one row below its phase and the first subtask
//! shares its task's row:
//!
//! ```text
//! Phase 0
//!         Task 0.1   Subtask 0.1.1
//!                    Subtask 0.1.2
//!         Task 0.2   Subtask 0.2.1
//! Phase 1
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{NodeKind, Position, WorkflowNode};

/// Distance between columns and between rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpacing {
    pub horizontal: u32,
    pub vertical: u32,
}

impl Default for NodeSpacing {
    fn default() -> Self {
        Self {
            horizontal: 280,
            vertical: 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub spacing: NodeSpacing,
    /// Extra space after each task's rows
    pub task_gap: u32,
    /// Extra space after each phase
    pub phase_gap: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: NodeSpacing::default(),
            task_gap: 20,
            phase_gap: 60,
        }
    }
}

impl LayoutConfig {
    pub fn with_spacing(mut self, spacing: NodeSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_horizontal_spacing(mut self, horizontal: u32) -> Self {
        self.spacing.horizontal = horizontal;
        self
    }

    pub fn with_vertical_spacing(mut self, vertical: u32) -> Self {
        self.spacing.vertical = vertical;
        self
    }

    pub fn with_gaps(mut self, task_gap: u32, phase_gap: u32) -> Self {
        self.task_gap = task_gap;
        self.phase_gap = phase_gap;
        self
    }

    fn column(&self, kind: NodeKind) -> u32 {
        match kind {
            NodeKind::Phase => 0,
            NodeKind::Task => self.spacing.horizontal,
            NodeKind::Subtask => self.spacing.horizontal.saturating_mul(2),
        }
    }
}

/// Assign a position to every node.
///
/// Children are found through `parent` and keep their input order. A node
/// whose parent is not in `nodes` is stacked below the last phase in its
/// kind's column.
pub fn layout(mut nodes: Vec<WorkflowNode>, config: &LayoutConfig) -> Vec<WorkflowNode> {
    let row = config.spacing.vertical;

    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut phases = Vec::new();
    for (index, node) in nodes.iter().enumerate() {
        match (node.kind, node.parent.as_deref()) {
            (NodeKind::Phase, _) => phases.push(index),
            (_, Some(parent)) => children.entry(parent).or_default().push(index),
            (_, None) => {}
        }
    }
    let children_of = |index: usize| {
        children
            .get(nodes[index].id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    };

    let mut positions: Vec<Option<Position>> = vec![None; nodes.len()];
    let mut y = 0u32;
    for &phase in &phases {
        positions[phase] = Some(Position::new(config.column(NodeKind::Phase), y));
        let mut task_y = y.saturating_add(row);

        for &task in children_of(phase) {
            if nodes[task].kind != NodeKind::Task {
                continue;
            }
            positions[task] = Some(Position::new(config.column(NodeKind::Task), task_y));

            let mut rows = 0u32;
            for &subtask in children_of(task) {
                let subtask_y = task_y.saturating_add(rows.saturating_mul(row));
                positions[subtask] =
                    Some(Position::new(config.column(NodeKind::Subtask), subtask_y));
                rows += 1;
            }
            task_y = task_y
                .saturating_add(rows.max(1).saturating_mul(row))
                .saturating_add(config.task_gap);
        }
        y = task_y.saturating_add(config.phase_gap);
    }

    let positions: Vec<Position> = positions
        .into_iter()
        .zip(nodes.iter())
        .map(|(position, node)| {
            position.unwrap_or_else(|| {
                let orphan = Position::new(config.column(node.kind), y);
                y = y.saturating_add(row);
                orphan
            })
        })
        .collect();

    for (node, position) in nodes.iter_mut().zip(positions) {
        node.position = position;
    }
    nodes
}
