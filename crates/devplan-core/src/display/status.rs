//! One-line confirmations for commands that change a plan file.

use std::fmt;

/// Outcome message printed after a write operation.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let done = OperationStatus::success("Marked subtask 0.1.1 complete");
        assert_eq!(done.to_string(), "Success: Marked subtask 0.1.1 complete\n");

        let failed = OperationStatus::failure(String::from("Subtask 9.9.9 not found"));
        assert!(failed.to_string().starts_with("Error:"));
    }
}
