//! CLI argument parsing for the story report renderer.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "story-report",
    version,
    about = "Render story runner event logs as an HTML report",
    after_help = "Examples:\n  story-report render --events run.jsonl --out report.html\n  story-report render --events - --summary summary.json < run.jsonl\n  story-report init-config --out report-config.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Render(RenderArgs),
    InitConfig(InitConfigArgs),
}

/// Render command inputs.
#[derive(Parser, Debug)]
#[command(about = "Replay a JSON-lines event log into an HTML report")]
pub struct RenderArgs {
    /// Event log with one JSON event per line (`-` reads stdin)
    #[arg(long, value_name = "PATH")]
    pub events: PathBuf,

    /// Output path for the report (stdout when omitted)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Report config JSON (built-in defaults when omitted)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output path for the run summary JSON
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Log per-story and per-scenario progress to stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Init-config command inputs.
#[derive(Parser, Debug)]
#[command(about = "Write the default report config")]
pub struct InitConfigArgs {
    /// Output path for the config JSON
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}
