use std::fmt;

use crate::models::SubtaskDetail;

fn list(f: &mut fmt::Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "## {heading}")?;
    writeln!(f)?;
    for item in items {
        writeln!(f, "- {item}")?;
    }
    Ok(())
}

impl fmt::Display for SubtaskDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subtask = &self.subtask;
        writeln!(f, "# Subtask {}: {}", subtask.id, subtask.title)?;
        writeln!(f)?;
        writeln!(f, "- **Status**: {}", subtask.status().with_icon())?;
        writeln!(f, "- **Phase**: {}", self.phase)?;
        writeln!(f, "- **Task**: {}", self.task)?;
        if let Some(branch) = &self.branch {
            writeln!(f, "- **Branch**: `{branch}`")?;
        }
        if !subtask.prerequisites.is_empty() {
            let ids: Vec<String> = subtask.prerequisites.iter().map(ToString::to_string).collect();
            writeln!(f, "- **Prerequisites**: {}", ids.join(", "))?;
        }

        if !subtask.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", subtask.description)?;
        }

        list(f, "Deliverables", &subtask.deliverables)?;
        list(f, "Success Criteria", &subtask.success_criteria)?;
        list(f, "Files to Create", &subtask.files_to_create)?;
        list(f, "Files to Modify", &subtask.files_to_modify)
    }
}
