//! Markdown summaries of validation and lint results.

use std::fmt;

use crate::{
    lint::{FindingKind, LintReport},
    validate::{Issue, Severity, ValidationReport},
};

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**{}**: {}", self.severity, self.message)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Validation: {}", self.project_name)?;
        writeln!(f)?;

        let verdict = if self.is_valid() { "✓ Valid" } else { "✗ Invalid" };
        let mode = if self.strict { " (strict)" } else { "" };
        writeln!(f, "{verdict}{mode}")?;
        writeln!(f)?;
        writeln!(f, "- **Errors**: {}", self.error_count())?;
        writeln!(f, "- **Warnings**: {}", self.warning_count())?;

        for (heading, issues) in [
            ("Errors", self.errors().collect::<Vec<_>>()),
            ("Warnings", self.warnings().collect::<Vec<_>>()),
        ] {
            if issues.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "## {heading}")?;
            writeln!(f)?;
            for issue in issues {
                writeln!(f, "- {}", issue.message)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for LintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_executable {
            "✓ Executable"
        } else {
            "✗ Not executable"
        };
        writeln!(f, "# Lint: {verdict}")?;
        writeln!(f)?;
        writeln!(f, "- **Subtasks checked**: {}", self.stats.subtasks_checked)?;
        writeln!(f, "- **Code blocks checked**: {}", self.stats.code_blocks_checked)?;
        writeln!(f, "- **Issues found**: {}", self.stats.issues_found)?;

        if !self.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Issues")?;
            for finding in &self.errors {
                writeln!(f)?;
                writeln!(f, "### Subtask {} ({})", finding.subtask_id, finding.kind)?;
                writeln!(f)?;
                writeln!(f, "{}", finding.message)?;
                writeln!(f)?;
                writeln!(f, "**Fix**: {}", finding.fix)?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Warnings")?;
            writeln!(f)?;
            for warning in &self.warnings {
                writeln!(f, "- {warning}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lint::{LintFinding, LintStats},
        models::SubtaskId,
        validate::IssueKind,
    };

    #[test]
    fn test_validation_report_display() {
        let report = ValidationReport {
            project_name: "Atlas".to_string(),
            strict: false,
            issues: vec![
                Issue::warning(
                    IssueKind::EmptyPhase,
                    None,
                    "Phase 2 has no tasks".to_string(),
                ),
                Issue::error(
                    IssueKind::MissingPrerequisite,
                    Some(SubtaskId::new(0, 1, 2)),
                    "Subtask 0.1.2: prerequisite '9.9.9' does not exist in the plan".to_string(),
                ),
            ],
        };
        let output = report.to_string();
        assert!(output.starts_with("# Validation: Atlas\n\n✗ Invalid\n"));
        assert!(output.contains("- **Errors**: 1\n- **Warnings**: 1\n"));
        assert!(output.contains("## Errors\n\n- Subtask 0.1.2: prerequisite"));
        assert!(output.ends_with("## Warnings\n\n- Phase 2 has no tasks\n"));
        assert_eq!(report.issues[1].to_string(), "**error**: Subtask 0.1.2: prerequisite '9.9.9' does not exist in the plan");
    }

    #[test]
    fn test_lint_report_display() {
        let clean = LintReport {
            is_executable: true,
            ..LintReport::default()
        };
        let output = clean.to_string();
        assert!(output.starts_with("# Lint: ✓ Executable\n"));
        assert!(!output.contains("## Issues"));

        let report = LintReport {
            is_executable: false,
            errors: vec![LintFinding {
                subtask_id: SubtaskId::new(1, 1, 1),
                kind: FindingKind::AddToInstruction,
                message: "Says 'add to' without complete code".to_string(),
                fix: "Show the complete file".to_string(),
            }],
            warnings: vec!["No subtasks found; nothing to lint".to_string()],
            stats: LintStats {
                subtasks_checked: 1,
                code_blocks_checked: 0,
                issues_found: 1,
            },
        };
        let output = report.to_string();
        assert!(output.contains("### Subtask 1.1.1 (add_to_instruction)\n"));
        assert!(output.contains("**Fix**: Show the complete file\n"));
        assert!(output.ends_with("## Warnings\n\n- No subtasks found; nothing to lint\n"));
    }
}
