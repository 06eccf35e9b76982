//! Display implementations and wrapper types.
//!
//! Two kinds of output live here:
//!
//! - **Canonical markdown**: `Display for PlanDocument` renders a plan in the
//!   exact grammar [`crate::parse`] reads, so render → parse is lossless for
//!   every field the grammar defines.
//! - **Reports**: markdown summaries of parse, validation, lint and lookup
//!   results for terminal display, plus [`OperationStatus`] for one-line
//!   confirmations.
//!
//! ```rust
//! use devplan_core::parse;
//!
//! let text = "## Phase 0: Foundation\n### Task 0.1: Setup\n**Subtask 0.1.1: Init**\n";
//! let plan = parse(text).unwrap().plan;
//! let rendered = plan.to_string();
//! assert!(rendered.contains("**Subtask 0.1.1: Init**"));
//! assert_eq!(parse(&rendered).unwrap().plan, plan);
//! ```

pub mod detail;
pub mod plan;
pub mod reports;
pub mod status;

pub use plan::PlanOverview;
pub use status::OperationStatus;
