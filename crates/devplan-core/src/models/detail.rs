//! Subtask lookup with its surrounding context.

use serde::{Deserialize, Serialize};

use super::{PlanDocument, Subtask, SubtaskId};

/// A subtask together with the phase and task that own it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskDetail {
    /// Owning phase, e.g. `Phase 1: Core Features`
    pub phase: String,
    /// Owning task, e.g. `Task 1.2: User Authentication`
    pub task: String,
    /// Branch shared by every subtask of the task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub subtask: Subtask,
}

impl PlanDocument {
    /// Look up a subtask and the phase/task labels around it.
    pub fn subtask_detail(&self, id: &SubtaskId) -> Option<SubtaskDetail> {
        self.phases.iter().find_map(|phase| {
            phase.tasks.iter().find_map(|task| {
                task.subtasks
                    .iter()
                    .find(|subtask| &subtask.id == id)
                    .map(|subtask| SubtaskDetail {
                        phase: phase.label(),
                        task: task.label(),
                        branch: task.git_branch.clone(),
                        subtask: subtask.clone(),
                    })
            })
        })
    }
}
