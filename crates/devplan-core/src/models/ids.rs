//! Dotted identifiers for tasks and subtasks.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

fn parse_component(value: &str, part: &str) -> Result<u32, PlanError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PlanError::invalid_id(value, "components must be non-negative integers"));
    }
    part.parse::<u32>()
        .map_err(|e| PlanError::invalid_id(value, e.to_string()))
}

/// Identifier of a task, written `<phase>.<index>` (e.g. `1.2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId {
    pub phase: u32,
    pub index: u32,
}

impl TaskId {
    pub fn new(phase: u32, index: u32) -> Self {
        Self { phase, index }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.phase, self.index)
    }
}

impl FromStr for TaskId {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        match parts.as_slice() {
            [phase, index] => Ok(Self {
                phase: parse_component(s, phase)?,
                index: parse_component(s, index)?,
            }),
            _ => Err(PlanError::invalid_id(s, "task ids have the form X.Y")),
        }
    }
}

impl TryFrom<String> for TaskId {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}

/// Identifier of a subtask, written `<phase>.<task>.<index>` (e.g. `1.2.3`).
///
/// Ordering is numeric component by component, so `0.2.1 < 0.10.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubtaskId {
    pub phase: u32,
    pub task: u32,
    pub index: u32,
}

impl SubtaskId {
    pub fn new(phase: u32, task: u32, index: u32) -> Self {
        Self { phase, task, index }
    }

    /// Id of the task this subtask belongs to.
    pub fn task_id(&self) -> TaskId {
        TaskId::new(self.phase, self.task)
    }
}

impl fmt::Display for SubtaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.phase, self.task, self.index)
    }
}

impl FromStr for SubtaskId {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        match parts.as_slice() {
            [phase, task, index] => Ok(Self {
                phase: parse_component(s, phase)?,
                task: parse_component(s, task)?,
                index: parse_component(s, index)?,
            }),
            _ => Err(PlanError::invalid_id(s, "subtask ids have the form X.Y.Z")),
        }
    }
}

impl TryFrom<String> for SubtaskId {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SubtaskId> for String {
    fn from(id: SubtaskId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtask_id_parse_and_display() {
        let id: SubtaskId = "1.2.3".parse().expect("valid id");
        assert_eq!(id, SubtaskId::new(1, 2, 3));
        assert_eq!(id.to_string(), "1.2.3");
        assert_eq!(id.task_id(), TaskId::new(1, 2));
    }

    #[test]
    fn test_subtask_id_rejects_malformed() {
        assert!("1.2".parse::<SubtaskId>().is_err());
        assert!("1.x.3".parse::<SubtaskId>().is_err());
        assert!("1.2.3.4".parse::<SubtaskId>().is_err());
        assert!("-1.2.3".parse::<SubtaskId>().is_err());
        assert!("99999999999.0.0".parse::<SubtaskId>().is_err());
    }

    #[test]
    fn test_numeric_ordering() {
        let a: SubtaskId = "0.2.1".parse().unwrap();
        let b: SubtaskId = "0.10.1".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_serde_as_string() {
        let id = SubtaskId::new(0, 1, 2);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0.1.2\"");
        let back: SubtaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<TaskId>("\"nope\"").is_err());
    }
}
