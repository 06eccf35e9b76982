//! Command handlers.
//!
//! Each handler reads the plan, runs one core operation and prints either a
//! rendered markdown report or machine-readable output. The returned
//! [`ExitCode`] is non-zero when the report contains problems.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    process::ExitCode,
};

use anyhow::{bail, Context, Result};
use devplan_core::{
    display::OperationStatus, export_mermaid, export_web_graph, lint, mark_complete,
    mark_complete_on, parse, ExportOptions, ParseReport, PlanDocument, ValidationReport,
};
use jiff::Zoned;
use log::{info, warn};

use crate::{
    args::{
        CompleteArgs, GraphArgs, LintArgs, OutputFormat, ParseArgs, SubtaskArgs, ValidateArgs,
    },
    renderer::TerminalRenderer,
};

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_plan(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read plan from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn parse_plan(path: &Path, text: &str) -> Result<PlanDocument> {
    let parsed = parse(text).with_context(|| format!("Failed to parse {}", path.display()))?;
    for warning in &parsed.warnings {
        warn!("{warning}");
    }
    Ok(parsed.plan)
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub struct Cli {
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(renderer: TerminalRenderer) -> Self {
        Self { renderer }
    }

    fn json(&self, value: &impl serde::Serialize) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        self.renderer.raw(&json)
    }

    pub fn parse(&self, args: &ParseArgs) -> Result<ExitCode> {
        let text = read_plan(&args.file)?;
        match args.format {
            OutputFormat::Json => {
                let report = ParseReport::from(parse(&text));
                self.json(&report)?;
                Ok(exit_code(report.success))
            }
            OutputFormat::Markdown => {
                let parsed =
                    parse(&text).with_context(|| format!("Failed to parse {}", args.file.display()))?;
                self.renderer.render(&parsed.to_string())?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    pub fn validate(&self, args: &ValidateArgs) -> Result<ExitCode> {
        let text = read_plan(&args.file)?;
        let plan = parse_plan(&args.file, &text)?;
        let report = ValidationReport::new(&plan, args.strict);
        info!(
            "Validated '{}': {} errors, {} warnings",
            report.project_name,
            report.error_count(),
            report.warning_count()
        );

        match args.format {
            OutputFormat::Json => self.json(&report)?,
            OutputFormat::Markdown => self.renderer.render(&report.to_string())?,
        }
        Ok(exit_code(report.is_valid()))
    }

    pub fn graph(&self, args: &GraphArgs) -> Result<ExitCode> {
        let text = read_plan(&args.file)?;
        let plan = parse_plan(&args.file, &text)?;
        let options = ExportOptions::from(args);

        if args.mermaid {
            self.renderer.raw(&export_mermaid(&plan, &options))?;
        } else {
            let json = export_web_graph(&plan, &options)
                .to_json()
                .context("Failed to serialize graph")?;
            self.renderer.raw(&json)?;
        }
        Ok(ExitCode::SUCCESS)
    }

    pub fn lint(&self, args: &LintArgs) -> Result<ExitCode> {
        let text = read_plan(&args.file)?;
        let report = lint(&text);
        match args.format {
            OutputFormat::Json => self.json(&report)?,
            OutputFormat::Markdown => self.renderer.render(&report.to_string())?,
        }
        Ok(exit_code(report.is_executable))
    }

    pub fn subtask(&self, args: &SubtaskArgs) -> Result<ExitCode> {
        let text = read_plan(&args.file)?;
        let plan = parse_plan(&args.file, &text)?;
        let Some(detail) = plan.subtask_detail(&args.id) else {
            bail!("Subtask {} not found in {}", args.id, args.file.display());
        };

        match args.format {
            OutputFormat::Json => self.json(&detail)?,
            OutputFormat::Markdown => self.renderer.render(&detail.to_string())?,
        }
        Ok(ExitCode::SUCCESS)
    }

    pub fn complete(&self, args: &CompleteArgs) -> Result<ExitCode> {
        if args.write && is_stdin(&args.file) {
            bail!("--write needs a plan file, not stdin");
        }
        let text = read_plan(&args.file)?;
        let updated = if args.no_date {
            mark_complete(&text, &args.id, &args.notes)
        } else {
            mark_complete_on(&text, &args.id, &args.notes, Zoned::now().date())
        }
        .with_context(|| format!("Failed to complete subtask {}", args.id))?;

        if !args.write {
            self.renderer.raw(&updated)?;
            return Ok(ExitCode::SUCCESS);
        }

        fs::write(&args.file, &updated)
            .with_context(|| format!("Failed to write {}", args.file.display()))?;
        info!("Marked subtask {} complete in {}", args.id, args.file.display());
        let status = OperationStatus::success(format!(
            "Marked subtask {} complete in {}",
            args.id,
            args.file.display()
        ));
        self.renderer.render(&status.to_string())?;
        Ok(ExitCode::SUCCESS)
    }
}
