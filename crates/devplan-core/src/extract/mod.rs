//! Span-based pattern extraction over plan markdown.
//!
//! Nothing here builds a syntax tree. A document is sliced into spans by a
//! delimiter pattern ([`partition`]), each span is sliced again by the next
//! level's pattern ([`outline`]), and fields are pulled out of the resulting
//! spans with the line scanners in [`fields`] and [`code`].
//!
//! # Examples
//!
//! ```rust
//! use devplan_core::extract::{field_value, outline};
//!
//! let text = "**Goal**: Ship\n\n## Phase 0: Foundation\n### Task 0.1: Setup\n**Subtask 0.1.1: Init**\n";
//! let outline = outline(text).unwrap();
//! assert_eq!(field_value(outline.preamble, "Goal"), Some("Ship"));
//! assert_eq!(outline.phases[0].tasks[0].subtasks[0].title, "Init");
//! ```

pub mod code;
pub mod fields;
pub mod outline;
pub(crate) mod patterns;

use regex::Regex;

pub use code::{code_blocks, strip_code_blocks, CodeBlock};
pub use fields::{
    backticked_or_whole, bold_label, checkboxes, field_value, first_number, leading_subtask_ids,
    section_items, subtask_ids, unquote, Checkbox,
};
pub use outline::{outline, Outline, PhaseSpan, SubtaskSpan, TaskSpan};

use patterns::{PROGRESS_HEADING, SECTION_HEADING};

/// One delimiter match and the text it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'t> {
    /// Offset of the delimiter match within the partitioned text
    pub start: usize,
    /// Offset of the first byte after the delimiter match
    pub body_start: usize,
    /// From the delimiter match up to the next match or end of text
    pub text: &'t str,
    /// Everything after the delimiter match
    pub body: &'t str,
    groups: Vec<Option<&'t str>>,
}

impl<'t> Section<'t> {
    /// Capture group `index` of the delimiter match (0 is the whole match).
    pub fn group(&self, index: usize) -> Option<&'t str> {
        self.groups.get(index).copied().flatten()
    }
}

/// Split `text` at every match of `delimiter`.
///
/// Returns the text before the first match and one [`Section`] per match,
/// in order. Sections never overlap and together with the preamble cover
/// the whole input.
pub fn partition<'t>(text: &'t str, delimiter: &Regex) -> (&'t str, Vec<Section<'t>>) {
    let mut starts = Vec::new();
    for caps in delimiter.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let groups = caps.iter().map(|m| m.map(|m| m.as_str())).collect();
        starts.push((whole.start(), whole.end(), groups));
    }

    let preamble_end = starts.first().map_or(text.len(), |(start, _, _)| *start);
    let mut sections = Vec::with_capacity(starts.len());
    let mut iter = starts.into_iter().peekable();
    while let Some((start, body_start, groups)) = iter.next() {
        let end = iter.peek().map_or(text.len(), |(next, _, _)| *next);
        sections.push(Section {
            start,
            body_start,
            text: &text[start..end],
            body: &text[body_start..end],
            groups,
        });
    }

    (&text[..preamble_end], sections)
}

/// The body of the `## Progress Tracking` section and its offset in `text`.
///
/// The section runs to the next level-one or level-two heading, so its
/// `### Phase` sub-headings stay inside it.
pub fn tracking_section(text: &str) -> Option<(usize, &str)> {
    let heading = PROGRESS_HEADING.find(text)?;
    let rest = &text[heading.end()..];
    let end = SECTION_HEADING
        .find(rest)
        .map_or(rest.len(), |next| next.start());
    Some((heading.end(), &rest[..end]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use patterns::PHASE_HEADING;

    #[test]
    fn test_partition_covers_input() {
        let text = "intro\n## Phase 0: A\nbody a\n## Phase 1: B (2 days)\nbody b\n";
        let (preamble, sections) = partition(text, &PHASE_HEADING);
        assert_eq!(preamble, "intro\n");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].group(1), Some("0"));
        assert_eq!(sections[0].body, "\nbody a\n");
        assert_eq!(sections[1].group(2), Some("B"));
        assert_eq!(sections[1].group(3), Some("2 days"));
        assert_eq!(sections[1].start, text.find("## Phase 1").unwrap());

        let rebuilt: String = std::iter::once(preamble)
            .chain(sections.iter().map(|s| s.text))
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_partition_without_matches() {
        let (preamble, sections) = partition("just prose", &PHASE_HEADING);
        assert_eq!(preamble, "just prose");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_tracking_section_keeps_subheadings() {
        let text = "# Plan\n## Progress Tracking\n### Phase 0: A\n- [x] 0.1.1: Init\n## Phase 0: A\n";
        let (offset, body) = tracking_section(text).unwrap();
        assert!(body.contains("### Phase 0: A"));
        assert!(body.contains("- [x] 0.1.1: Init"));
        assert_eq!(body, "\n### Phase 0: A\n- [x] 0.1.1: Init\n");
        assert_eq!(&text[offset..offset + body.len()], body);
        assert!(tracking_section("## Phase 0: A\n").is_none());
    }
}
