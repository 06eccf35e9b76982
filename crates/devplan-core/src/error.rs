//! Error types for the plan engine.

use thiserror::Error;

/// Comprehensive error type for all plan operations.
///
/// Only structural problems that make a document unusable are errors. Style
/// problems are reported as [`crate::validate::Issue`]s and executability
/// problems as [`crate::lint::LintFinding`]s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The document has no `## Phase N: Title` headings at all
    #[error(
        "No phases found in document: expected headings like '## Phase 0: Foundation'"
    )]
    NoPhases,
    /// Phase numbers must strictly increase in document order
    #[error("Phase {found} appears after Phase {previous}; phase numbers must increase")]
    PhaseOrder { previous: u32, found: u32 },
    /// A task or subtask id does not start with its parent's id
    #[error("{kind} {id} is declared inside {parent}")]
    IdMismatch {
        kind: &'static str,
        id: String,
        parent: String,
    },
    /// The same task or subtask id is declared twice
    #[error("{kind} {id} is declared more than once")]
    DuplicateId { kind: &'static str, id: String },
    /// A dotted identifier could not be parsed
    #[error("Invalid identifier '{value}': {reason}")]
    InvalidId { value: String, reason: String },
    /// Subtask not found for the given ID
    #[error("Subtask {id} not found in plan")]
    SubtaskNotFound { id: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlanError {
        PlanError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlanError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an identifier parse error.
    pub fn invalid_id(value: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::InvalidId {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is the "document has no phases" failure, as opposed to
    /// another structural problem.
    pub fn is_no_phases(&self) -> bool {
        matches!(self, PlanError::NoPhases)
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(source: serde_json::Error) -> Self {
        PlanError::Serialization {
            message: source.to_string(),
        }
    }
}

/// Result type alias for plan operations
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_phases_message() {
        let error = PlanError::NoPhases;
        assert!(error.to_string().starts_with("No phases found"));
        assert!(error.is_no_phases());
    }

    #[test]
    fn test_invalid_input_builder() {
        let error = PlanError::invalid_input("notes").with_reason("too short");
        assert_eq!(
            error.to_string(),
            "Invalid input for field 'notes': too short"
        );
        assert!(!error.is_no_phases());
    }
}
