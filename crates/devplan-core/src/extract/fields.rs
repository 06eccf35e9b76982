//! Labeled-section scanning: `**Label**: value` lines and the lists under
//! them.

use super::patterns::{BACKTICKED, CHECKBOX, NUMBER, SUBTASK_ID_TOKEN};
use crate::models::SubtaskId;

/// A `- [ ]` / `- [x]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox<'t> {
    pub checked: bool,
    pub text: &'t str,
}

/// Split a line of the form `**Label**: rest` (or `**Label:** rest`) into
/// label and trimmed remainder. A leading list marker is accepted only when
/// `allow_list_marker` is set.
pub fn bold_label(line: &str, allow_list_marker: bool) -> Option<(&str, &str)> {
    let mut rest = line.trim_start();
    if allow_list_marker {
        if let Some(stripped) = rest
            .strip_prefix("- ")
            .or_else(|| rest.strip_prefix("* "))
            .or_else(|| rest.strip_prefix("+ "))
        {
            rest = stripped.trim_start();
        }
    }
    let inner = rest.strip_prefix("**")?;
    let close = inner.find("**")?;
    let label = &inner[..close];
    let after = &inner[close + 2..];

    let (label, after) = if let Some(label) = label.strip_suffix(':') {
        (label, after)
    } else {
        (label, after.trim_start().strip_prefix(':')?)
    };
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    Some((label, after.trim()))
}

/// Remainder of the first `**Label**: value` line, or `None` when the label
/// is absent or has no inline value. Labels match case-insensitively.
pub fn field_value<'t>(text: &'t str, label: &str) -> Option<&'t str> {
    text.lines()
        .filter_map(|line| bold_label(line, true))
        .find(|(found, _)| found.eq_ignore_ascii_case(label))
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Whether a line ends a labeled list: a top-level bold label, a heading,
/// a horizontal rule or a code fence.
pub(crate) fn is_section_break(line: &str) -> bool {
    let trimmed = line.trim();
    bold_label(line, false).is_some()
        || trimmed.starts_with('#')
        || trimmed.starts_with("```")
        || trimmed.starts_with("~~~")
        || is_rule(trimmed)
}

fn is_rule(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first @ ('-' | '*' | '_')) => trimmed.len() >= 3 && chars.all(|c| c == first),
        _ => false,
    }
}

/// Text of a list item with its marker and any checkbox removed.
pub(crate) fn list_item(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let body = if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .or_else(|| trimmed.strip_prefix("+ "))
    {
        rest
    } else {
        let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        trimmed[digits..].strip_prefix(". ")?
    };
    let body = body.trim_start();
    let body = ["[ ]", "[x]", "[X]"]
        .iter()
        .find_map(|mark| body.strip_prefix(mark))
        .unwrap_or(body);
    Some(body.trim())
}

/// Items listed under a `**Label**:` line, up to the next section break.
///
/// Returns `None` when the label does not occur. A non-empty inline value on
/// the label line counts as the first item.
pub fn section_items(text: &str, label: &str) -> Option<Vec<String>> {
    let mut lines = text.lines();
    let inline = lines.by_ref().find_map(|line| {
        bold_label(line, true)
            .filter(|(found, _)| found.eq_ignore_ascii_case(label))
            .map(|(_, value)| value)
    })?;

    let mut items = Vec::new();
    if !inline.is_empty() {
        items.push(inline.to_string());
    }
    for line in lines {
        if is_section_break(line) {
            break;
        }
        if let Some(item) = list_item(line).filter(|item| !item.is_empty()) {
            items.push(item.to_string());
        }
    }
    Some(items)
}

/// All checkbox lines in `text`.
pub fn checkboxes(text: &str) -> Vec<Checkbox<'_>> {
    CHECKBOX
        .captures_iter(text)
        .filter_map(|caps| {
            let mark = caps.get(1)?.as_str();
            let body = caps.get(2)?.as_str();
            Some(Checkbox {
                checked: mark.eq_ignore_ascii_case("x"),
                text: body,
            })
        })
        .collect()
}

/// Every well-formed subtask id mentioned in `text`, in order of appearance.
pub fn subtask_ids(text: &str) -> Vec<SubtaskId> {
    SUBTASK_ID_TOKEN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Subtask ids at the start of a list item, before any other text.
///
/// `0.1.1, 0.1.2` and `Subtask 0.1.1: Setup` yield their ids; a version
/// such as `3.11.4` later in the item's description is not an id.
pub fn leading_subtask_ids(item: &str) -> Vec<SubtaskId> {
    let mut ids = Vec::new();
    let mut rest = item;
    for found in SUBTASK_ID_TOKEN.find_iter(item) {
        let gap = &item[item.len() - rest.len()..found.start()];
        let gap = if ids.is_empty() {
            gap.trim()
                .strip_prefix("Subtask")
                .or_else(|| gap.trim().strip_prefix("subtask"))
                .unwrap_or(gap)
        } else {
            gap
        };
        let separator_only = gap
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '&' | '`'))
            .all(|word| word.is_empty() || word.eq_ignore_ascii_case("and"));
        if !separator_only {
            break;
        }
        match found.as_str().parse() {
            Ok(id) => ids.push(id),
            Err(_) => break,
        }
        rest = &item[found.end()..];
    }
    ids
}

/// First integer in `text`, e.g. `2` from `Phase 2`.
pub fn first_number(text: &str) -> Option<u32> {
    NUMBER.find(text).and_then(|m| m.as_str().parse().ok())
}

/// First back-ticked token, or the whole value when there is none.
pub fn backticked_or_whole(value: &str) -> &str {
    BACKTICKED
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map_or(value, |m| m.as_str())
        .trim()
}

/// Strip one pair of surrounding backticks from a bare `code` item.
pub fn unquote(item: &str) -> &str {
    match item.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        Some(inner) if !inner.is_empty() && !inner.contains('`') => inner,
        _ => item,
    }
}
