//! Structural validation of a parsed plan.
//!
//! Validation never fails; it produces a list of [`Issue`]s with a
//! [`Severity`]. Checks run in three passes: shape (titles, deliverable
//! counts, empty containers), references (every prerequisite exists) and
//! cycles (see [`cycles`]).

pub mod cycles;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{PlanDocument, SubtaskId};

/// Recommended number of deliverables per subtask, inclusive.
pub const DELIVERABLE_RANGE: std::ops::RangeInclusive<usize> = 3..=7;

/// Suffix every subtask title is expected to carry.
pub const SESSION_MARKER: &str = "(Single Session)";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// What a validation issue is about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Subtask title lacks the `(Single Session)` marker
    SessionTitle,
    /// Deliverable count outside [`DELIVERABLE_RANGE`]
    DeliverableCount,
    MissingSuccessCriteria,
    /// Phase 0 is not a Foundation phase
    FoundationPhase,
    EmptyTask,
    EmptyPhase,
    MissingPrerequisite,
    DependencyCycle,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtask_id: Option<SubtaskId>,
    pub message: String,
}

impl Issue {
    pub fn warning(kind: IssueKind, subtask_id: Option<SubtaskId>, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            subtask_id,
            message,
        }
    }

    pub fn error(kind: IssueKind, subtask_id: Option<SubtaskId>, message: String) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            subtask_id,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Validate a plan's shape, references and dependency graph.
///
/// With `strict` every warning is reported as an error.
pub fn validate(plan: &PlanDocument, strict: bool) -> Vec<Issue> {
    let mut issues = shape_issues(plan);
    issues.extend(reference_issues(plan));
    issues.extend(cycle_issues(plan));

    if strict {
        for issue in &mut issues {
            issue.severity = Severity::Error;
        }
    }

    debug!(
        "Validated '{}' (strict={strict}): {} issues",
        plan.project_name,
        issues.len()
    );
    issues
}

fn shape_issues(plan: &PlanDocument) -> Vec<Issue> {
    let mut issues = Vec::new();

    for phase in &plan.phases {
        if phase.number == 0 && !phase.title.to_lowercase().contains("foundation") {
            issues.push(Issue::warning(
                IssueKind::FoundationPhase,
                None,
                format!(
                    "Phase 0 should be the Foundation phase (found '{}')",
                    phase.title
                ),
            ));
        }
        if phase.tasks.is_empty() {
            issues.push(Issue::error(
                IssueKind::EmptyPhase,
                None,
                format!("Phase {} has no tasks", phase.number),
            ));
        }

        for task in &phase.tasks {
            if task.subtasks.is_empty() {
                issues.push(Issue::error(
                    IssueKind::EmptyTask,
                    None,
                    format!("Task {} has no subtasks", task.id),
                ));
            }

            for subtask in &task.subtasks {
                let id = Some(subtask.id);
                if !subtask.title.contains(SESSION_MARKER) {
                    issues.push(Issue::warning(
                        IssueKind::SessionTitle,
                        id,
                        format!(
                            "Subtask {}: title should end with '{SESSION_MARKER}'",
                            subtask.id
                        ),
                    ));
                }
                let count = subtask.deliverables.len();
                if !DELIVERABLE_RANGE.contains(&count) {
                    issues.push(Issue::warning(
                        IssueKind::DeliverableCount,
                        id,
                        format!(
                            "Subtask {} has {count} deliverables (recommended: {}-{})",
                            subtask.id,
                            DELIVERABLE_RANGE.start(),
                            DELIVERABLE_RANGE.end()
                        ),
                    ));
                }
                if subtask.success_criteria.is_empty() {
                    issues.push(Issue::warning(
                        IssueKind::MissingSuccessCriteria,
                        id,
                        format!("Subtask {} has no success criteria", subtask.id),
                    ));
                }
            }
        }
    }

    issues
}

fn reference_issues(plan: &PlanDocument) -> Vec<Issue> {
    let known = plan.subtask_ids();
    plan.subtasks()
        .flat_map(|subtask| {
            subtask
                .prerequisites
                .iter()
                .filter(|prerequisite| !known.contains(prerequisite))
                .map(move |prerequisite| {
                    Issue::error(
                        IssueKind::MissingPrerequisite,
                        Some(subtask.id),
                        format!(
                            "Subtask {}: prerequisite '{prerequisite}' does not exist in the plan",
                            subtask.id
                        ),
                    )
                })
        })
        .collect()
}

/// Prerequisite graph restricted to subtasks that exist.
pub fn dependency_graph(plan: &PlanDocument) -> BTreeMap<SubtaskId, BTreeSet<SubtaskId>> {
    let known = plan.subtask_ids();
    plan.subtasks()
        .map(|subtask| {
            let prerequisites = subtask
                .prerequisites
                .intersection(&known)
                .copied()
                .collect();
            (subtask.id, prerequisites)
        })
        .collect()
}

fn cycle_issues(plan: &PlanDocument) -> Vec<Issue> {
    cycles::find_cycles(&dependency_graph(plan))
        .into_iter()
        .map(|cycle| {
            let path = cycle
                .nodes
                .iter()
                .map(SubtaskId::to_string)
                .collect::<Vec<_>>()
                .join(" -> ");
            Issue::error(
                IssueKind::DependencyCycle,
                Some(cycle.closing),
                format!(
                    "Circular dependency detected involving subtask {} ({path})",
                    cycle.closing
                ),
            )
        })
        .collect()
}

/// Validation outcome for a whole plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub project_name: String,
    pub strict: bool,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new(plan: &PlanDocument, strict: bool) -> Self {
        Self {
            project_name: plan.project_name.clone(),
            strict,
            issues: validate(plan, strict),
        }
    }

    /// True when no issue has error severity.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(Issue::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}
