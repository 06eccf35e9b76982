//! Progress status derived from Progress Tracking checkboxes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of progress states for phases, tasks and subtasks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Nothing below this entity has been completed
    #[default]
    Pending,

    /// Some, but not all, descendant subtasks are completed
    InProgress,

    /// Every descendant subtask is completed
    Completed,
}

impl Status {
    /// Aggregate status from descendant subtask counts.
    ///
    /// An entity with no subtasks is pending.
    pub fn from_counts(completed: usize, total: usize) -> Self {
        if total == 0 || completed == 0 {
            Status::Pending
        } else if completed >= total {
            Status::Completed
        } else {
            Status::InProgress
        }
    }

    /// Status of a single subtask.
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            Status::Completed
        } else {
            Status::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use devplan_core::models::Status;
    ///
    /// assert_eq!(Status::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(Status::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(Status::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            Status::Completed => "✓ Completed",
            Status::InProgress => "➤ In Progress",
            Status::Pending => "○ Pending",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" | "todo" => Ok(Status::Pending),
            "in_progress" | "inprogress" => Ok(Status::InProgress),
            "completed" | "done" => Ok(Status::Completed),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}
