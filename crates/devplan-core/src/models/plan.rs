//! Plan document model: phases, tasks and subtasks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Status, SubtaskId, TaskId};

/// A parsed development plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    /// Name of the project the plan describes
    pub project_name: String,

    /// Project-level goal statement
    #[serde(default)]
    pub goal: String,

    /// Phases in document order
    #[serde(default)]
    pub phases: Vec<Phase>,

    /// Phase currently being worked on, from `**Current**: Phase N`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<u32>,

    /// Next actionable subtask, from `**Next**: X.Y.Z`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_subtask: Option<SubtaskId>,
}

/// A major milestone grouping tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub goal: String,
    /// Estimated duration, e.g. `3 days`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A group of subtasks sharing one git branch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

/// A single-session unit of work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: SubtaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Checked in the Progress Tracking section
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub prerequisites: BTreeSet<SubtaskId>,
    #[serde(default)]
    pub deliverables: Vec<String>,
    #[serde(default)]
    pub success_criteria: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files_to_create: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files_to_modify: Vec<String>,
}

impl PlanDocument {
    /// Iterate over every subtask in document order.
    pub fn subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.phases
            .iter()
            .flat_map(|phase| phase.tasks.iter())
            .flat_map(|task| task.subtasks.iter())
    }

    /// All subtask ids present in the plan.
    pub fn subtask_ids(&self) -> BTreeSet<SubtaskId> {
        self.subtasks().map(|subtask| subtask.id).collect()
    }

    pub fn find_subtask(&self, id: &SubtaskId) -> Option<&Subtask> {
        self.subtasks().find(|subtask| &subtask.id == id)
    }

    /// Whether the given subtask exists and is checked off.
    pub fn is_completed(&self, id: &SubtaskId) -> bool {
        self.find_subtask(id).is_some_and(|subtask| subtask.completed)
    }

    /// Overall progress across every subtask.
    pub fn status(&self) -> Status {
        let total = self.subtasks().count();
        let done = self.subtasks().filter(|s| s.completed).count();
        Status::from_counts(done, total)
    }
}

impl Phase {
    /// Heading form used in labels, e.g. `Phase 0: Foundation`.
    pub fn label(&self) -> String {
        format!("Phase {}: {}", self.number, self.title)
    }

    pub fn subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.tasks.iter().flat_map(|task| task.subtasks.iter())
    }

    pub fn status(&self) -> Status {
        let total = self.subtasks().count();
        let done = self.subtasks().filter(|s| s.completed).count();
        Status::from_counts(done, total)
    }
}

impl Task {
    /// Heading form used in labels, e.g. `Task 0.1: Project Setup`.
    pub fn label(&self) -> String {
        format!("Task {}: {}", self.id, self.title)
    }

    pub fn status(&self) -> Status {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        Status::from_counts(done, self.subtasks.len())
    }
}

impl Subtask {
    pub fn status(&self) -> Status {
        Status::from_completed(self.completed)
    }
}
