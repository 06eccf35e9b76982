//! Plan rendering: canonical markdown and the terminal overview.

use std::fmt;

use crate::{
    models::{Phase, PlanDocument, Status, Subtask, Task},
    parser::ParsedPlan,
};

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "- [x]"
    } else {
        "- [ ]"
    }
}

/// File paths are written as code spans unless that would be ambiguous.
fn code_span(path: &str) -> String {
    if path.contains('`') {
        path.to_string()
    } else {
        format!("`{path}`")
    }
}

impl fmt::Display for PlanDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} - Development Plan", self.project_name)?;
        writeln!(f)?;
        writeln!(f, "**Project Name**: {}", self.project_name)?;
        if !self.goal.is_empty() {
            writeln!(f, "**Goal**: {}", self.goal)?;
        }
        writeln!(f)?;

        writeln!(f, "## Progress Tracking")?;
        for phase in &self.phases {
            writeln!(f)?;
            writeln!(f, "### {}", phase.label())?;
            for subtask in phase.subtasks() {
                writeln!(
                    f,
                    "{} {}: {}",
                    checkbox(subtask.completed),
                    subtask.id,
                    subtask.title
                )?;
            }
        }
        if self.current_phase.is_some() || self.next_subtask.is_some() {
            writeln!(f)?;
        }
        if let Some(current) = self.current_phase {
            writeln!(f, "**Current**: Phase {current}")?;
        }
        if let Some(next) = &self.next_subtask {
            writeln!(f, "**Next**: {next}")?;
        }
        writeln!(f)?;
        writeln!(f, "---")?;

        for phase in &self.phases {
            writeln!(f)?;
            write!(f, "{phase}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.duration {
            Some(duration) => writeln!(f, "## {} ({duration})", self.label())?,
            None => writeln!(f, "## {}", self.label())?,
        }
        if !self.goal.is_empty() {
            writeln!(f)?;
            writeln!(f, "**Goal**: {}", self.goal)?;
        }
        for task in &self.tasks {
            writeln!(f)?;
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.label())?;
        if !self.goal.is_empty() {
            writeln!(f)?;
            writeln!(f, "**Goal**: {}", self.goal)?;
        }
        if let Some(branch) = &self.git_branch {
            writeln!(f)?;
            writeln!(f, "**Git Strategy**:")?;
            writeln!(f, "- **Branch**: {}", code_span(branch))?;
        }
        for subtask in &self.subtasks {
            writeln!(f)?;
            write!(f, "{subtask}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Subtask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**Subtask {}: {}**", self.id, self.title)?;

        if self.description.contains('\n') {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        } else if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "**Description**: {}", self.description)?;
        }

        writeln!(f)?;
        writeln!(f, "**Prerequisites**:")?;
        if self.prerequisites.is_empty() {
            writeln!(f, "- None")?;
        }
        for prerequisite in &self.prerequisites {
            writeln!(f, "- [ ] {prerequisite}")?;
        }

        for (label, items) in [
            ("Deliverables", &self.deliverables),
            ("Success Criteria", &self.success_criteria),
        ] {
            if items.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "**{label}**:")?;
            for item in items {
                writeln!(f, "{} {item}", checkbox(self.completed))?;
            }
        }

        for (label, paths) in [
            ("Files to Create", &self.files_to_create),
            ("Files to Modify", &self.files_to_modify),
        ] {
            if paths.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "**{label}**:")?;
            for path in paths {
                writeln!(f, "- {}", code_span(path))?;
            }
        }

        writeln!(f)?;
        writeln!(f, "---")
    }
}

/// Terminal summary of a plan: progress per phase, task and subtask.
pub struct PlanOverview<'a>(pub &'a PlanDocument);

impl fmt::Display for PlanOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        writeln!(f, "# {}", plan.project_name)?;
        writeln!(f)?;
        if !plan.goal.is_empty() {
            writeln!(f, "{}", plan.goal)?;
            writeln!(f)?;
        }

        let total = plan.subtasks().count();
        let done = plan.subtasks().filter(|s| s.completed).count();
        writeln!(f, "- **Status**: {} ({done}/{total})", plan.status().with_icon())?;
        if let Some(current) = plan.current_phase {
            writeln!(f, "- **Current**: Phase {current}")?;
        }
        if let Some(next) = &plan.next_subtask {
            writeln!(f, "- **Next**: {next}")?;
        }

        for phase in &plan.phases {
            writeln!(f)?;
            writeln!(f, "## {} ({})", phase.label(), phase.status().with_icon())?;
            writeln!(f)?;
            if phase.tasks.is_empty() {
                writeln!(f, "No tasks in this phase.")?;
            }
            for task in &phase.tasks {
                writeln!(f, "- {} ({})", task.label(), task.status().with_icon())?;
                for subtask in &task.subtasks {
                    writeln!(
                        f,
                        "  {} {}: {}",
                        checkbox(subtask.completed),
                        subtask.id,
                        subtask.title
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for ParsedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", PlanOverview(&self.plan))?;
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
    use crate::parse;

    const PLAN: &str = "\
# Atlas - Development Plan

**Goal**: Ship a CLI

## Progress Tracking
- [x] 0.1.1: Init (Single Session)
- [ ] 0.1.2: Wire

**Current**: Phase 0
**Next**: 0.1.2

## Phase 0: Foundation (2 days)

**Goal**: Skeleton

### Task 0.1: Setup

**Goal**: Buildable

- **Branch**: `feature/0-1-setup` (from `main`)

**Subtask 0.1.1: Init (Single Session)**

Create the layout.
Keep it small.

**Deliverables**:
- [ ] Create repo
- [ ] Add README

**Success Criteria**:
- [ ] Builds

**Files to Create**:
- `Cargo.toml`

**Subtask 0.1.2: Wire**

**Description**: Wire CI.

**Prerequisites**:
- [x] 0.1.1

**Files to Modify**:
- `.github/workflows/ci.yml`

## Phase 2: Later

### Task 2.1: Empty
";

    #[test]
    fn test_render_then_parse_round_trip() {
        let plan = parse(PLAN).unwrap().plan;
        let rendered = plan.to_string();
        let reparsed = parse(&rendered).unwrap();
        assert_eq!(reparsed.plan, plan);
        assert!(reparsed.warnings.is_empty(), "{:?}", reparsed.warnings);
        assert_eq!(parse(&reparsed.plan.to_string()).unwrap().plan, plan);
    }

    #[test]
    fn test_canonical_layout() {
        let plan = parse(PLAN).unwrap().plan;
        let rendered = plan.to_string();
        assert!(rendered.starts_with("# Atlas - Development Plan\n\n**Project Name**: Atlas\n"));
        assert!(rendered.contains("### Phase 0: Foundation\n- [x] 0.1.1: Init (Single Session)\n"));
        assert!(rendered.contains("## Phase 0: Foundation (2 days)\n"));
        assert!(rendered.contains("- **Branch**: `feature/0-1-setup`\n"));
        assert!(rendered.contains("**Description**: Wire CI.\n"));
        assert!(rendered.contains("**Prerequisites**:\n- None\n"));
        // Completed subtasks render their boxes checked.
        assert!(rendered.contains("- [x] Create repo\n"));
        assert!(rendered.contains("- `.github/workflows/ci.yml`\n"));
    }

    #[test]
    fn test_overview() {
        let mut parsed = parse(PLAN).unwrap();
        let overview = PlanOverview(&parsed.plan).to_string();
        assert!(overview.starts_with("# Atlas\n"));
        assert!(overview.contains("- **Status**: ➤ In Progress (1/2)"));
        assert!(overview.contains("## Phase 2: Later (○ Pending)"));
        assert!(overview.contains("  - [x] 0.1.1: Init (Single Session)"));

        assert!(!parsed.to_string().contains("## Warnings"));
        parsed.warnings.push("Progress Tracking lists unknown subtask 9.9.9".to_string());
        assert!(parsed
            .to_string()
            .ends_with("## Warnings\n\n- Progress Tracking lists unknown subtask 9.9.9\n"));
    }
}
