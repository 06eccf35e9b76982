//! Core library for working with markdown development plans.
//!
//! A development plan is a `DEVELOPMENT_PLAN.md` document organized as
//! phases, tasks and single-session subtasks, with a `## Progress Tracking`
//! checklist recording what is done. This crate reads such documents and
//! everything downstream of them:
//!
//! - [`parser`]: markdown → [`PlanDocument`], with non-fatal warnings
//! - [`validate`]: structural quality checks and prerequisite cycles
//! - [`graph`]: workflow nodes, dependency edges and a deterministic layout
//! - [`export`]: web-canvas JSON and Mermaid flowcharts
//! - [`lint`]: whether each subtask can be executed exactly as written
//! - [`progress`]: checking a subtask off in the source text
//! - [`display`]: canonical markdown rendering and report formatting
//!
//! # Display Architecture
//!
//! Models and reports implement [`std::fmt::Display`] as markdown. For
//! [`PlanDocument`] that markdown is the same grammar the parser reads, so a
//! rendered plan parses back to an equal value. The CLI hands report markdown
//! to its terminal renderer.
//!
//! # Quick Start
//!
//! ```rust
//! use devplan_core::{export_mermaid, lint, parse, validate, ExportOptions};
//!
//! let text = concat!(
//!     "# Atlas - Development Plan\n\n",
//!     "## Progress Tracking\n",
//!     "- [x] 0.1.1: Init (Single Session)\n\n",
//!     "## Phase 0: Foundation\n",
//!     "### Task 0.1: Setup\n",
//!     "**Subtask 0.1.1: Init (Single Session)**\n\n",
//!     "**Deliverables**:\n",
//!     "- [ ] Create repo\n",
//!     "- [ ] Add README\n",
//!     "- [ ] Add CI\n\n",
//!     "**Success Criteria**:\n",
//!     "- [ ] Builds\n",
//! );
//!
//! let parsed = parse(text).unwrap();
//! assert_eq!(parsed.plan.project_name, "Atlas");
//! assert!(parsed.plan.phases[0].tasks[0].subtasks[0].completed);
//!
//! assert!(validate(&parsed.plan, false).is_empty());
//! assert!(lint(text).is_executable);
//! assert!(export_mermaid(&parsed.plan, &ExportOptions::default()).starts_with("flowchart TD"));
//! ```

pub mod display;
pub mod error;
pub mod export;
pub mod extract;
pub mod graph;
pub mod lint;
pub mod models;
pub mod parser;
pub mod progress;
pub mod validate;

// Re-export commonly used types
pub use display::{OperationStatus, PlanOverview};
pub use error::{PlanError, Result};
pub use export::{
    export_mermaid, export_web_graph, to_mermaid, to_web_graph, ExportOptions, WebGraph,
};
pub use graph::{
    build_edges, build_nodes,
    layout::{layout, LayoutConfig, NodeSpacing},
    GraphOptions, WorkflowEdge, WorkflowNode,
};
pub use lint::{lint, LintFinding, LintReport, Linter};
pub use models::{Phase, PlanDocument, Status, Subtask, SubtaskDetail, SubtaskId, Task, TaskId};
pub use parser::{parse, ParseReport, ParsedPlan};
pub use progress::{mark_complete, mark_complete_on};
pub use validate::{validate, Issue, IssueKind, Severity, ValidationReport};
