//! In-place progress updates.
//!
//! [`mark_complete`] edits the original markdown rather than re-rendering
//! the parsed plan, so everything outside the touched lines stays
//! byte-identical.

use std::ops::RangeInclusive;

use jiff::civil::Date;
use log::info;

use crate::{
    error::{PlanError, Result},
    extract::{
        bold_label,
        fields::{is_section_break, list_item},
        outline, subtask_ids, tracking_section,
    },
    models::SubtaskId,
    parse,
};

/// Accepted length of completion notes, in characters after trimming.
pub const NOTES_LENGTH: RangeInclusive<usize> = 10..=2000;

const CHECKED_SECTIONS: [&str; 2] = ["Deliverables", "Success Criteria"];

struct Edit {
    start: usize,
    end: usize,
    text: String,
}

impl Edit {
    fn insert(at: usize, text: String) -> Self {
        Self {
            start: at,
            end: at,
            text,
        }
    }
}

/// Lines of `text` with their starting offsets, line terminators removed.
fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line.trim_end_matches(['\n', '\r'])))
    })
}

/// Edit that turns the `[ ]` of an unchecked list item into `[x]`.
fn check_box(line: &str, line_start: usize) -> Option<Edit> {
    let trimmed = line.trim_start();
    let rest = trimmed
        .strip_prefix(['-', '*', '+'])?
        .trim_start()
        .strip_prefix("[ ]")?;
    let at = line.len() - rest.len() - 3;
    Some(Edit {
        start: line_start + at,
        end: line_start + at + 3,
        text: "[x]".to_string(),
    })
}

fn normalize_notes(notes: &str) -> Result<String> {
    let notes = notes
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let length = notes.chars().count();
    if !NOTES_LENGTH.contains(&length) {
        return Err(PlanError::invalid_input("notes").with_reason(format!(
            "must be between {} and {} characters (got {length})",
            NOTES_LENGTH.start(),
            NOTES_LENGTH.end()
        )));
    }
    Ok(notes)
}

/// Mark a subtask complete and record completion notes.
///
/// Checks the subtask's Progress Tracking entry and the boxes under its
/// Deliverables and Success Criteria, then fills in (or adds) the
/// `- **Implementation**:` line of its Completion Notes.
pub fn mark_complete(text: &str, id: &SubtaskId, notes: &str) -> Result<String> {
    update(text, id, notes, None)
}

/// [`mark_complete`], also recording `- **Completed**: <date>`.
pub fn mark_complete_on(text: &str, id: &SubtaskId, notes: &str, date: Date) -> Result<String> {
    update(text, id, notes, Some(date))
}

fn update(text: &str, id: &SubtaskId, notes: &str, date: Option<Date>) -> Result<String> {
    let notes = normalize_notes(notes)?;
    let plan = parse(text)?.plan;
    if plan.find_subtask(id).is_none() {
        return Err(PlanError::SubtaskNotFound { id: id.to_string() });
    }

    let mut edits: Vec<Edit> = tracking_edit(text, id)?.into_iter().collect();

    let outline = outline(text)?;
    let span = outline
        .subtasks()
        .find(|span| span.id() == *id)
        .ok_or_else(|| PlanError::SubtaskNotFound { id: id.to_string() })?;

    let mut section: Option<&str> = None;
    for (start, line) in lines(span.text) {
        if let Some((label, _)) = bold_label(line, false) {
            section = Some(label);
            continue;
        }
        if is_section_break(line) {
            section = None;
            continue;
        }
        let in_checked_section = section.is_some_and(|label| {
            CHECKED_SECTIONS
                .iter()
                .any(|name| name.eq_ignore_ascii_case(label))
        });
        if in_checked_section {
            edits.extend(check_box(line, span.offset + start));
        }
    }

    edits.extend(notes_edits(span.text, span.offset, &notes, date));

    edits.sort_by(|a, b| b.start.cmp(&a.start));
    let mut updated = text.to_string();
    for edit in edits {
        updated.replace_range(edit.start..edit.end, &edit.text);
    }

    info!("Marked subtask {id} complete");
    Ok(updated)
}

/// Edit checking the tracking entry for `id`, or `None` when it is already
/// checked.
fn tracking_edit(text: &str, id: &SubtaskId) -> Result<Option<Edit>> {
    let untracked = || {
        PlanError::invalid_input("subtask_id")
            .with_reason(format!("Subtask {id} is not listed in Progress Tracking"))
    };
    let (offset, body) = tracking_section(text).ok_or_else(untracked)?;

    let (start, line) = lines(body)
        .find(|(_, line)| {
            list_item(line)
                .and_then(|item| subtask_ids(item).into_iter().next())
                .is_some_and(|found| found == *id)
        })
        .ok_or_else(untracked)?;

    Ok(check_box(line, offset + start))
}

fn notes_edits(span: &str, offset: usize, notes: &str, date: Option<Date>) -> Vec<Edit> {
    let field_line = |wanted: &str| {
        lines(span).find(|(_, line)| {
            bold_label(line, true).is_some_and(|(label, _)| label.eq_ignore_ascii_case(wanted))
        })
    };
    let completed_line = date.map(|date| format!("- **Completed**: {date}"));

    if let Some((start, line)) = field_line("Implementation") {
        let mut edits = vec![Edit {
            start: offset + start,
            end: offset + start + line.len(),
            text: format!("- **Implementation**: {notes}"),
        }];
        if let Some(completed) = completed_line {
            edits.push(match field_line("Completed") {
                Some((start, line)) => Edit {
                    start: offset + start,
                    end: offset + start + line.len(),
                    text: completed,
                },
                None => Edit::insert(offset + start + line.len(), format!("\n{completed}")),
            });
        }
        return edits;
    }

    let mut block = format!("- **Implementation**: {notes}");
    if let Some(completed) = completed_line {
        block.push('\n');
        block.push_str(&completed);
    }

    if let Some((start, line)) = field_line("Completion Notes") {
        return vec![Edit::insert(offset + start + line.len(), format!("\n{block}"))];
    }

    // Before a trailing horizontal rule, if the subtask ends with one.
    let mut end = span.trim_end().len();
    if let Some(last_start) = span[..end].rfind('\n') {
        let last = span[last_start + 1..end].trim();
        if last.len() >= 3 && last.chars().all(|c| c == '-') {
            end = span[..last_start].trim_end().len();
        }
    }
    vec![Edit::insert(
        offset + end,
        format!("\n\n**Completion Notes**:\n{block}"),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = "\
# Demo - Development Plan

## Progress Tracking
- [ ] 0.1.1: Init
- [ ] 0.1.2: Wire

## Phase 0: Foundation
### Task 0.1: Setup

**Subtask 0.1.1: Init**

**Deliverables**:
- [ ] Create repo
- [ ] Add README

**Success Criteria**:
- [ ] Repo builds

**Completion Notes**:
- **Implementation**: (describe what was done)

---

**Subtask 0.1.2: Wire**

**Prerequisites**:
- [ ] 0.1.1

**Deliverables**:
- [ ] Wire it

---
";

    const NOTES: &str = "Created the repository and README.";

    #[test]
    fn test_mark_complete_updates_checkboxes_and_notes() {
        let updated = mark_complete(PLAN, &SubtaskId::new(0, 1, 1), NOTES).unwrap();

        assert!(updated.contains("- [x] 0.1.1: Init"));
        assert!(updated.contains("- [ ] 0.1.2: Wire"));
        assert!(updated.contains("- [x] Create repo\n- [x] Add README"));
        assert!(updated.contains("- [x] Repo builds"));
        assert!(updated.contains(&format!("- **Implementation**: {NOTES}")));
        // 0.1.2 is untouched, including its prerequisite box.
        assert!(updated.contains("**Prerequisites**:\n- [ ] 0.1.1"));
        assert!(updated.contains("- [ ] Wire it"));

        let plan = parse(&updated).unwrap().plan;
        assert!(plan.is_completed(&SubtaskId::new(0, 1, 1)));
        assert!(!plan.is_completed(&SubtaskId::new(0, 1, 2)));
    }

    #[test]
    fn test_other_lines_are_unchanged() {
        let updated = mark_complete(PLAN, &SubtaskId::new(0, 1, 1), NOTES).unwrap();
        let before: Vec<_> = PLAN.lines().collect();
        let after: Vec<_> = updated.lines().collect();
        assert_eq!(before.len(), after.len());
        let changed = before
            .iter()
            .zip(&after)
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 5);
    }

    #[test]
    fn test_notes_block_is_added_before_rule() {
        let date = Date::new(2025, 3, 4).unwrap();
        let updated = mark_complete_on(PLAN, &SubtaskId::new(0, 1, 2), NOTES, date).unwrap();
        assert!(updated.contains(&format!(
            "- [x] Wire it\n\n**Completion Notes**:\n- **Implementation**: {NOTES}\n- **Completed**: 2025-03-04\n\n---\n"
        )));
        assert!(updated.contains("- [x] 0.1.2: Wire"));
    }

    #[test]
    fn test_marking_twice_replaces_notes() {
        let id = SubtaskId::new(0, 1, 1);
        let once = mark_complete(PLAN, &id, NOTES).unwrap();
        let twice = mark_complete(&once, &id, "Second pass over the repository.").unwrap();
        assert!(twice.contains("- **Implementation**: Second pass over the repository."));
        assert!(!twice.contains(NOTES));
        assert_eq!(twice.matches("- [x] 0.1.1").count(), 1);
    }

    #[test]
    fn test_rejects_bad_input() {
        let id = SubtaskId::new(0, 1, 1);
        assert!(matches!(
            mark_complete(PLAN, &id, "short"),
            Err(PlanError::InvalidInput { .. })
        ));
        assert!(mark_complete(PLAN, &id, &"x".repeat(2001)).is_err());
        assert_eq!(
            mark_complete(PLAN, &SubtaskId::new(5, 5, 5), NOTES).unwrap_err(),
            PlanError::SubtaskNotFound {
                id: "5.5.5".to_string()
            }
        );

        let untracked = PLAN.replace("- [ ] 0.1.1: Init\n", "");
        let error = mark_complete(&untracked, &id, NOTES).unwrap_err();
        assert!(error.to_string().contains("not listed in Progress Tracking"));
    }
}
