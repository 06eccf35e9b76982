//! devplan CLI application
//!
//! Command-line interface for parsing, validating, graphing and linting
//! markdown development plans.

mod args;
mod cli;
mod renderer;

use std::process::ExitCode;

use anyhow::Result;
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::debug;
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<ExitCode> {
    env_logger::init();

    let Args { no_color, command } = Args::parse();
    let cli = Cli::new(TerminalRenderer::new(!no_color));

    debug!("devplan started");

    match command {
        Parse(args) => cli.parse(&args),
        Validate(args) => cli.validate(&args),
        Graph(args) => cli.graph(&args),
        Lint(args) => cli.lint(&args),
        Subtask(args) => cli.subtask(&args),
        Complete(args) => cli.complete(&args),
    }
}
