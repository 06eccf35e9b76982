//! Compiled patterns for the plan markdown grammar.

use std::sync::LazyLock;

use regex::Regex;

/// `## Phase N: Title (duration)`; exactly two hashes so the `### Phase`
/// sub-headings of Progress Tracking never start a phase.
pub(crate) static PHASE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^##[ \t]+Phase[ \t]+(\d+)[ \t]*:[ \t]*(.*?)(?:[ \t]*\(([^()\n]*)\))?[ \t]*\r?$",
    )
    .expect("phase heading pattern")
});

/// `### Task N.M: Title`
pub(crate) static TASK_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^###[ \t]+Task[ \t]+(\d+)\.(\d+)[ \t]*:[ \t]*(.*?)[ \t]*\r?$")
        .expect("task heading pattern")
});

/// `**Subtask N.M.P: Title**` or `#### Subtask N.M.P: Title`
pub(crate) static SUBTASK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?:\*\*|####[ \t]+)Subtask[ \t]+(\d+)\.(\d+)\.(\d+)[ \t]*:[ \t]*(.*?)[ \t]*(?:\*\*)?[ \t]*\r?$",
    )
    .expect("subtask marker pattern")
});

/// `# Project - Development Plan`
pub(crate) static TITLE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*\r?$").expect("title heading pattern")
});

pub(crate) static PROGRESS_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^##[ \t]+Progress[ \t]+Tracking[ \t]*\r?$")
        .expect("progress heading pattern")
});

/// Any level-one or level-two heading; closes the Progress Tracking section.
pub(crate) static SECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,2}[ \t]+\S").expect("section heading pattern"));

pub(crate) static CHECKBOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*[-*+][ \t]+\[([ xX])\][ \t]+(.*?)[ \t]*\r?$").expect("checkbox pattern")
});

pub(crate) static SUBTASK_ID_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\.\d+\.\d+\b").expect("subtask id pattern"));

pub(crate) static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("number pattern"));

pub(crate) static BACKTICKED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("backtick pattern"));
