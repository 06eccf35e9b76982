//! Plan parser: markdown text → [`PlanDocument`].
//!
//! Parsing is a two-step affair. [`crate::extract::outline`] slices the text
//! into phase, task and subtask spans, and this module pulls the labeled
//! fields out of each span. Completion state comes only from the
//! `## Progress Tracking` checklist; checkboxes inside a subtask's own
//! deliverables are ignored.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlanError, Result},
    extract::{
        backticked_or_whole, checkboxes, field_value, fields::is_section_break, first_number,
        leading_subtask_ids, outline,
        patterns::{SUBTASK_MARKER, TITLE_HEADING},
        section_items, subtask_ids, tracking_section, unquote, PhaseSpan, SubtaskSpan, TaskSpan,
    },
    models::{Phase, PlanDocument, Subtask, SubtaskId, Task, TaskId},
};


/// Name used when the document has neither a Project Name field nor a title.
pub const UNTITLED_PLAN: &str = "Untitled Plan";

/// A successfully parsed plan with any non-fatal observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPlan {
    pub plan: PlanDocument,
    pub warnings: Vec<String>,
}

/// Serializable outcome of a parse, for callers that report rather than
/// propagate failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl From<Result<ParsedPlan>> for ParseReport {
    fn from(result: Result<ParsedPlan>) -> Self {
        match result {
            Ok(parsed) => Self {
                success: true,
                plan: Some(parsed.plan),
                error: None,
                warnings: parsed.warnings,
            },
            Err(error) => Self {
                success: false,
                plan: None,
                error: Some(error.to_string()),
                warnings: Vec::new(),
            },
        }
    }
}

/// Parse a development plan.
///
/// Fails with [`PlanError::NoPhases`] when the text has no phase headings,
/// and with another [`PlanError`] variant when the phase/task/subtask
/// numbering is inconsistent.
///
/// ```rust
/// use devplan_core::parse;
///
/// let parsed = parse("## Phase 0: Foundation\n### Task 0.1: Setup\n**Subtask 0.1.1: Init**\n").unwrap();
/// assert_eq!(parsed.plan.phases[0].tasks[0].subtasks[0].id.to_string(), "0.1.1");
/// assert!(parse("").unwrap_err().to_string().starts_with("No phases found"));
/// ```
pub fn parse(text: &str) -> Result<ParsedPlan> {
    let outline = outline(text)?;
    if outline.phases.is_empty() {
        return Err(PlanError::NoPhases);
    }

    let mut warnings = Vec::new();
    let tracking = Tracking::read(text, outline.preamble);
    if tracking.is_none() {
        warnings.push(
            "No Progress Tracking section found; every subtask is treated as pending".to_string(),
        );
    }

    let mut task_ids = HashSet::new();
    let mut seen_subtasks = HashSet::new();
    let mut previous: Option<u32> = None;
    let mut phases = Vec::with_capacity(outline.phases.len());

    for span in &outline.phases {
        if let Some(previous) = previous {
            if span.number <= previous {
                return Err(PlanError::PhaseOrder {
                    previous,
                    found: span.number,
                });
            }
        }
        previous = Some(span.number);

        if let Some(stray) = SUBTASK_MARKER.find(span.preamble) {
            warnings.push(format!(
                "'{}' in Phase {} appears before any task and was ignored",
                stray.as_str().trim(),
                span.number
            ));
        }

        phases.push(build_phase(
            span,
            tracking.as_ref(),
            &mut task_ids,
            &mut seen_subtasks,
        )?);
    }

    let mut plan = PlanDocument {
        project_name: String::new(),
        goal: field_value(outline.preamble, "Goal")
            .unwrap_or_default()
            .to_string(),
        phases,
        current_phase: None,
        next_subtask: None,
    };
    plan.project_name = project_name(outline.preamble).unwrap_or_else(|| {
        warnings.push(format!(
            "No project name or title heading found; using '{UNTITLED_PLAN}'"
        ));
        UNTITLED_PLAN.to_string()
    });

    if let Some(tracking) = &tracking {
        plan.current_phase = tracking.current_phase;
        plan.next_subtask = tracking.next_subtask;
        for subtask in plan.subtasks() {
            if !tracking.entries.contains_key(&subtask.id) {
                warnings.push(format!(
                    "Subtask {} is not listed in Progress Tracking",
                    subtask.id
                ));
            }
        }
        for id in tracking.entries.keys() {
            if !seen_subtasks.contains(id) {
                warnings.push(format!("Progress Tracking lists unknown subtask {id}"));
            }
        }
    }

    debug!(
        "Parsed plan '{}': {} phases, {} subtasks, {} warnings",
        plan.project_name,
        plan.phases.len(),
        seen_subtasks.len(),
        warnings.len()
    );

    Ok(ParsedPlan { plan, warnings })
}

/// Checklist state read from the `## Progress Tracking` section.
struct Tracking {
    entries: BTreeMap<SubtaskId, bool>,
    current_phase: Option<u32>,
    next_subtask: Option<SubtaskId>,
}

impl Tracking {
    fn read(text: &str, preamble: &str) -> Option<Self> {
        let (_, body) = tracking_section(text)?;

        let mut entries = BTreeMap::new();
        for checkbox in checkboxes(body) {
            if let Some(id) = subtask_ids(checkbox.text).into_iter().next() {
                *entries.entry(id).or_insert(false) |= checkbox.checked;
            }
        }

        let field = |label: &str| field_value(body, label).or_else(|| field_value(preamble, label));
        Some(Self {
            entries,
            current_phase: field("Current").and_then(first_number),
            next_subtask: field("Next").and_then(|value| subtask_ids(value).into_iter().next()),
        })
    }

    fn is_checked(&self, id: &SubtaskId) -> bool {
        self.entries.get(id).copied().unwrap_or(false)
    }
}

fn project_name(preamble: &str) -> Option<String> {
    if let Some(name) = field_value(preamble, "Project Name") {
        return Some(name.to_string());
    }
    let title = TITLE_HEADING.captures(preamble)?.get(1)?.as_str();
    let name = title
        .strip_suffix("Development Plan")
        .map(|rest| rest.trim_end().trim_end_matches(['-', '–', '—', ':']).trim_end())
        .filter(|rest| !rest.is_empty())
        .unwrap_or(title);
    Some(name.to_string())
}

fn build_phase(
    span: &PhaseSpan<'_>,
    tracking: Option<&Tracking>,
    task_ids: &mut HashSet<TaskId>,
    seen_subtasks: &mut HashSet<SubtaskId>,
) -> Result<Phase> {
    let mut tasks = Vec::with_capacity(span.tasks.len());
    for task in &span.tasks {
        if task.phase != span.number {
            return Err(PlanError::IdMismatch {
                kind: "Task",
                id: task.id().to_string(),
                parent: format!("Phase {}", span.number),
            });
        }
        if !task_ids.insert(task.id()) {
            return Err(PlanError::DuplicateId {
                kind: "Task",
                id: task.id().to_string(),
            });
        }
        tasks.push(build_task(task, tracking, seen_subtasks)?);
    }

    Ok(Phase {
        number: span.number,
        title: span.title.to_string(),
        goal: field_value(span.preamble, "Goal")
            .unwrap_or_default()
            .to_string(),
        duration: span.duration.map(str::to_string),
        tasks,
    })
}

fn build_task(
    span: &TaskSpan<'_>,
    tracking: Option<&Tracking>,
    seen_subtasks: &mut HashSet<SubtaskId>,
) -> Result<Task> {
    let mut subtasks = Vec::with_capacity(span.subtasks.len());
    for subtask in &span.subtasks {
        let id = subtask.id();
        if id.task_id() != span.id() {
            return Err(PlanError::IdMismatch {
                kind: "Subtask",
                id: id.to_string(),
                parent: format!("Task {}", span.id()),
            });
        }
        if !seen_subtasks.insert(id) {
            return Err(PlanError::DuplicateId {
                kind: "Subtask",
                id: id.to_string(),
            });
        }
        let completed = tracking.is_some_and(|tracking| tracking.is_checked(&id));
        subtasks.push(build_subtask(subtask, completed));
    }

    Ok(Task {
        id: span.id(),
        title: span.title.to_string(),
        goal: field_value(span.preamble, "Goal")
            .unwrap_or_default()
            .to_string(),
        git_branch: field_value(span.preamble, "Branch")
            .map(backticked_or_whole)
            .filter(|branch| !branch.is_empty())
            .map(str::to_string),
        subtasks,
    })
}

fn build_subtask(span: &SubtaskSpan<'_>, completed: bool) -> Subtask {
    let items = |label| section_items(span.body, label).unwrap_or_default();
    let files = |label| -> Vec<String> {
        items(label)
            .iter()
            .map(|item| unquote(item).to_string())
            .collect()
    };

    Subtask {
        id: span.id(),
        title: span.title.to_string(),
        description: field_value(span.body, "Description")
            .map(str::to_string)
            .unwrap_or_else(|| leading_prose(span.body)),
        completed,
        prerequisites: items("Prerequisites")
            .iter()
            .flat_map(|item| leading_subtask_ids(item))
            .collect::<BTreeSet<_>>(),
        deliverables: items("Deliverables"),
        success_criteria: items("Success Criteria"),
        files_to_create: files("Files to Create"),
        files_to_modify: files("Files to Modify"),
    }
}

/// Prose between a subtask marker and its first labeled section.
fn leading_prose(body: &str) -> String {
    body.lines()
        .take_while(|line| !is_section_break(line))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
