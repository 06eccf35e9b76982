//! Phase → Task → Subtask span tree.

use super::{
    partition,
    patterns::{PHASE_HEADING, SUBTASK_MARKER, TASK_HEADING},
    Section,
};
use crate::{
    error::{PlanError, Result},
    models::{SubtaskId, TaskId},
};

/// Raw spans of a plan document, before any field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline<'t> {
    /// Text before the first phase heading
    pub preamble: &'t str,
    pub phases: Vec<PhaseSpan<'t>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSpan<'t> {
    pub number: u32,
    pub title: &'t str,
    /// Trailing parenthetical of the heading
    pub duration: Option<&'t str>,
    /// Byte offset of the heading in the outlined text
    pub offset: usize,
    /// Heading through the end of the phase
    pub text: &'t str,
    /// Between the heading and the first task heading
    pub preamble: &'t str,
    pub tasks: Vec<TaskSpan<'t>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpan<'t> {
    pub phase: u32,
    pub index: u32,
    pub title: &'t str,
    pub offset: usize,
    pub text: &'t str,
    /// Between the heading and the first subtask marker
    pub preamble: &'t str,
    pub subtasks: Vec<SubtaskSpan<'t>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskSpan<'t> {
    pub phase: u32,
    pub task: u32,
    pub index: u32,
    pub title: &'t str,
    pub offset: usize,
    /// Marker line through the end of the subtask
    pub text: &'t str,
    /// Everything after the marker line
    pub body: &'t str,
}

impl TaskSpan<'_> {
    pub fn id(&self) -> TaskId {
        TaskId::new(self.phase, self.index)
    }
}

impl SubtaskSpan<'_> {
    pub fn id(&self) -> SubtaskId {
        SubtaskId::new(self.phase, self.task, self.index)
    }
}

impl<'t> Outline<'t> {
    /// Every subtask span in document order.
    pub fn subtasks(&self) -> impl Iterator<Item = &SubtaskSpan<'t>> {
        self.phases
            .iter()
            .flat_map(|phase| phase.tasks.iter())
            .flat_map(|task| task.subtasks.iter())
    }
}

fn number(section: &Section<'_>, group: usize) -> Result<u32> {
    let raw = section.group(group).unwrap_or_default();
    raw.parse()
        .map_err(|e: std::num::ParseIntError| PlanError::invalid_id(raw, e.to_string()))
}

fn title<'t>(section: &Section<'t>, group: usize) -> &'t str {
    section.group(group).unwrap_or_default().trim()
}

/// Slice `text` into phase, task and subtask spans.
///
/// Each level is found by partitioning the body of the level above, so a
/// task heading before the first phase or a subtask marker before the first
/// task of its phase belongs to no span. Fails only when a number in a
/// heading does not fit in `u32`.
pub fn outline(text: &str) -> Result<Outline<'_>> {
    let (preamble, phase_sections) = partition(text, &PHASE_HEADING);
    let mut phases = Vec::with_capacity(phase_sections.len());

    for phase in &phase_sections {
        let phase_number = number(phase, 1)?;
        let phase_body = phase.body_start;
        let (phase_preamble, task_sections) = partition(phase.body, &TASK_HEADING);

        let mut tasks = Vec::with_capacity(task_sections.len());
        for task in &task_sections {
            let task_offset = phase_body + task.start;
            let task_body = phase_body + task.body_start;
            let (task_preamble, subtask_sections) = partition(task.body, &SUBTASK_MARKER);

            let subtasks = subtask_sections
                .iter()
                .map(|subtask| {
                    Ok(SubtaskSpan {
                        phase: number(subtask, 1)?,
                        task: number(subtask, 2)?,
                        index: number(subtask, 3)?,
                        title: title(subtask, 4),
                        offset: task_body + subtask.start,
                        text: subtask.text,
                        body: subtask.body,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            tasks.push(TaskSpan {
                phase: number(task, 1)?,
                index: number(task, 2)?,
                title: title(task, 3),
                offset: task_offset,
                text: task.text,
                preamble: task_preamble,
                subtasks,
            });
        }

        phases.push(PhaseSpan {
            number: phase_number,
            title: title(phase, 2),
            duration: phase.group(3).map(str::trim).filter(|d| !d.is_empty()),
            offset: phase.start,
            text: phase.text,
            preamble: phase_preamble,
            tasks,
        });
    }

    Ok(Outline { preamble, phases })
}
