//! Executability linter.
//!
//! Flags subtasks whose content could not be carried out mechanically by an
//! executor that only follows instructions: placeholder code, "add this to
//! the existing file" prose, modifications of code that is never shown,
//! missing imports and references to code that lives elsewhere.
//!
//! The linter reads raw text through [`crate::extract::outline`] and never
//! depends on a successful [`crate::parse`]. Rules are independent
//! [`LintRule`] objects held by a [`Linter`].

pub mod rules;

#[cfg(test)]
mod tests;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    extract::{code_blocks, outline, strip_code_blocks, CodeBlock, SubtaskSpan},
    models::SubtaskId,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    IncompleteCode,
    AddToInstruction,
    AmbiguousModification,
    MissingImports,
    CrossSubtaskReference,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::IncompleteCode => "incomplete_code",
            FindingKind::AddToInstruction => "add_to_instruction",
            FindingKind::AmbiguousModification => "ambiguous_modification",
            FindingKind::MissingImports => "missing_imports",
            FindingKind::CrossSubtaskReference => "cross_subtask_reference",
        }
    }
}

/// A reason a subtask cannot be executed as written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LintFinding {
    pub subtask_id: SubtaskId,
    pub kind: FindingKind,
    pub message: String,
    /// What the plan author should do about it
    pub fix: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LintStats {
    pub subtasks_checked: usize,
    pub code_blocks_checked: usize,
    pub issues_found: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    /// True when no rule produced a finding
    pub is_executable: bool,
    pub errors: Vec<LintFinding>,
    pub warnings: Vec<String>,
    pub stats: LintStats,
}

/// Everything a rule may look at for one subtask.
#[derive(Debug, Clone)]
pub struct SubtaskContext<'t> {
    pub id: SubtaskId,
    pub title: &'t str,
    /// Marker line through the end of the subtask
    pub text: &'t str,
    /// Body with fenced code removed
    pub prose: String,
    pub code_blocks: Vec<CodeBlock<'t>>,
    /// Document line number of the subtask marker
    pub line: usize,
}

impl<'t> SubtaskContext<'t> {
    pub fn new(span: &SubtaskSpan<'t>, document: &str) -> Self {
        let line = document
            .get(..span.offset)
            .map_or(1, |before| before.matches('\n').count() + 1);
        Self {
            id: span.id(),
            title: span.title,
            text: span.text,
            prose: strip_code_blocks(span.body),
            code_blocks: code_blocks(span.body),
            line,
        }
    }

    /// Document line of a code block's opening fence.
    pub fn line_of(&self, block: &CodeBlock<'_>) -> usize {
        self.line + block.line - 1
    }

    pub fn finding(
        &self,
        kind: FindingKind,
        message: impl Into<String>,
        fix: impl Into<String>,
    ) -> LintFinding {
        LintFinding {
            subtask_id: self.id,
            kind,
            message: message.into(),
            fix: fix.into(),
        }
    }
}

/// A single executability check.
pub trait LintRule: Send + Sync {
    fn kind(&self) -> FindingKind;

    fn check(&self, subtask: &SubtaskContext<'_>) -> Vec<LintFinding>;
}

/// Registry of lint rules applied to every subtask.
pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
}

impl Default for Linter {
    /// A linter with every built-in rule.
    fn default() -> Self {
        let mut linter = Self::new();
        for rule in rules::builtin() {
            linter.register(rule);
        }
        linter
    }
}

impl Linter {
    /// A linter with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    pub fn rule_kinds(&self) -> Vec<FindingKind> {
        self.rules.iter().map(|rule| rule.kind()).collect()
    }

    /// Run every rule over every subtask span of `text`.
    pub fn lint(&self, text: &str) -> LintReport {
        let mut report = LintReport::default();

        let outline = match outline(text) {
            Ok(outline) => outline,
            Err(error) => {
                report.warnings.push(format!("Could not outline plan: {error}"));
                report.is_executable = report.errors.is_empty();
                return report;
            }
        };

        for span in outline.subtasks() {
            let subtask = SubtaskContext::new(span, text);
            report.stats.subtasks_checked += 1;
            report.stats.code_blocks_checked += subtask.code_blocks.len();

            for block in subtask.code_blocks.iter().filter(|block| !block.terminated) {
                report.warnings.push(format!(
                    "Subtask {}: code block opened at line {} is never closed",
                    subtask.id,
                    subtask.line_of(block)
                ));
            }
            for rule in &self.rules {
                report.errors.extend(rule.check(&subtask));
            }
        }

        if report.stats.subtasks_checked == 0 {
            report
                .warnings
                .push("No subtasks found; nothing to lint".to_string());
        }
        report.stats.issues_found = report.errors.len();
        report.is_executable = report.errors.is_empty();

        debug!(
            "Linted {} subtasks, {} code blocks: {} findings",
            report.stats.subtasks_checked,
            report.stats.code_blocks_checked,
            report.stats.issues_found
        );
        report
    }
}

/// Lint `text` with the built-in rules.
pub fn lint(text: &str) -> LintReport {
    Linter::default().lint(text)
}
