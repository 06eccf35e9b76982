//! Command-line arguments.
//!
//! Argument structs carry clap attributes only; each converts into the core
//! option types through `From`, so the core never depends on clap.

use std::{fmt, path::PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use devplan_core::{models::SubtaskId, ExportOptions, GraphOptions, NodeSpacing};

/// Parse, validate, graph and lint markdown development plans.
///
/// Every command reads one plan file; pass `-` to read from stdin.
#[derive(Parser)]
#[command(version, about, name = "devplan")]
pub struct Args {
    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a plan and show its structure and progress
    Parse(ParseArgs),
    /// Check a plan for structural problems and prerequisite cycles
    Validate(ValidateArgs),
    /// Export a plan as a web graph (JSON) or Mermaid flowchart
    Graph(GraphArgs),
    /// Check that every subtask can be executed exactly as written
    Lint(LintArgs),
    /// Show one subtask with its phase, task and branch
    #[command(alias = "show")]
    Subtask(SubtaskArgs),
    /// Mark a subtask complete and record completion notes
    Complete(CompleteArgs),
}

/// Output format for report commands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable markdown
    #[default]
    Markdown,
    /// Machine-readable JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(ClapArgs)]
pub struct ParseArgs {
    /// Plan file, or `-` for stdin
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(ClapArgs)]
pub struct ValidateArgs {
    /// Plan file, or `-` for stdin
    pub file: PathBuf,
    /// Report every warning as an error
    #[arg(long)]
    pub strict: bool,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Graph export
///
/// Writes ReactFlow-style JSON by default. Node positions come from a
/// deterministic column layout whose spacing can be tuned.
#[derive(ClapArgs)]
pub struct GraphArgs {
    /// Plan file, or `-` for stdin
    pub file: PathBuf,
    /// Emit a Mermaid flowchart instead of JSON
    #[arg(long)]
    pub mermaid: bool,
    /// Leave completed subtasks out of the graph
    #[arg(long)]
    pub exclude_completed: bool,
    /// Attach success criteria to subtask nodes
    #[arg(long)]
    pub success_criteria: bool,
    /// Platform tag recorded in the JSON metadata
    #[arg(long, default_value = devplan_core::export::DEFAULT_PLATFORM)]
    pub platform: String,
    /// Distance between layout columns, at least 1
    #[arg(
        long,
        default_value_t = NodeSpacing::default().horizontal,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub horizontal_spacing: u32,
    /// Distance between layout rows, at least 1
    #[arg(
        long,
        default_value_t = NodeSpacing::default().vertical,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub vertical_spacing: u32,
}

impl From<&GraphArgs> for ExportOptions {
    fn from(val: &GraphArgs) -> Self {
        ExportOptions::default()
            .with_platform(val.platform.clone())
            .with_graph_options(
                GraphOptions::default()
                    .with_include_completed(!val.exclude_completed)
                    .with_success_criteria(val.success_criteria),
            )
            .with_spacing(NodeSpacing {
                horizontal: val.horizontal_spacing,
                vertical: val.vertical_spacing,
            })
    }
}

#[derive(ClapArgs)]
pub struct LintArgs {
    /// Plan file, or `-` for stdin
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(ClapArgs)]
pub struct SubtaskArgs {
    /// Plan file, or `-` for stdin
    pub file: PathBuf,
    /// Subtask id, e.g. `1.2.3`
    pub id: SubtaskId,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Mark a subtask complete
///
/// Checks the subtask off in Progress Tracking, ticks its deliverable and
/// success criteria boxes, and fills in its implementation notes. The
/// updated plan is printed unless `--write` is given.
#[derive(ClapArgs)]
pub struct CompleteArgs {
    /// Plan file, or `-` for stdin
    pub file: PathBuf,
    /// Subtask id, e.g. `1.2.3`
    pub id: SubtaskId,
    /// What was implemented (10 to 2000 characters)
    #[arg(short, long)]
    pub notes: String,
    /// Rewrite the plan file in place
    #[arg(short, long)]
    pub write: bool,
    /// Do not record today's date as the completion date
    #[arg(long)]
    pub no_date: bool,
}
