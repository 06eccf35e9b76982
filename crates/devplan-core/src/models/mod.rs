//! Data models for development plans.
//!
//! A plan is a strict three-level tree: [`Phase`] → [`Task`] → [`Subtask`].
//! Identifiers are numeric and dotted ([`TaskId`] `1.2`, [`SubtaskId`]
//! `1.2.3`) and each child's id starts with its parent's. Display
//! implementations for these models live in [`crate::display`].
//!
//! Completion is a property of the subtask only; phase and task progress is
//! always derived through [`Status::from_counts`].
//!
//! # Examples
//!
//! ```rust
//! use devplan_core::models::{Status, SubtaskId};
//!
//! let id: SubtaskId = "0.1.2".parse().unwrap();
//! assert_eq!(id.task_id().to_string(), "0.1");
//! assert_eq!(Status::from_counts(1, 2), Status::InProgress);
//! ```

pub mod detail;
pub mod ids;
pub mod plan;
pub mod status;

pub use detail::SubtaskDetail;
pub use ids::{SubtaskId, TaskId};
pub use plan::{Phase, PlanDocument, Subtask, Task};
pub use status::Status;
