use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use story_report::config::{config_stub, default_config, load_config};
use story_report::{dispatch, parse_event_line, HtmlReporter, ReportConfig, RunSummary};
use tracing_subscriber::EnvFilter;

mod cli;
mod staging;

use cli::{Command, InitConfigArgs, RenderArgs, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();

    match args.command {
        Command::Render(args) => cmd_render(args),
        Command::InitConfig(args) => cmd_init_config(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };
    let events = open_events(&args.events)?;

    let summary = match &args.out {
        Some(out) => {
            let staged = staging::create_staged_file(out)?;
            let (summary, staged) = render_events(events, BufWriter::new(staged), config)?;
            let staged = staged
                .into_inner()
                .map_err(|err| err.into_error())
                .context("flush staged report")?;
            staging::publish_staged_file(staged, out)?;
            eprintln!("Wrote report to {}", out.display());
            summary
        }
        None => {
            let stdout = BufWriter::new(io::stdout().lock());
            let (summary, _) = render_events(events, stdout, config)?;
            summary
        }
    };

    if let Some(path) = &args.summary {
        staging::write_staged_json(path, &summary)?;
        eprintln!("Wrote summary to {}", path.display());
    }
    Ok(())
}

fn open_events(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = fs::File::open(path).with_context(|| format!("open events {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn render_events<W: Write>(
    events: Box<dyn BufRead>,
    sink: W,
    config: ReportConfig,
) -> Result<(RunSummary, W)> {
    let mut reporter = HtmlReporter::new(sink, config).context("build reporter")?;
    for (idx, line) in events.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("read event line {line_no}"))?;
        let Some(event) = parse_event_line(&line, line_no)? else {
            continue;
        };
        dispatch(&mut reporter, &event).with_context(|| format!("event line {line_no}"))?;
    }
    let summary = reporter
        .summary()
        .cloned()
        .ok_or_else(|| anyhow!("event log ended before run_ended"))?;
    Ok((summary, reporter.into_inner()))
}

fn cmd_init_config(args: InitConfigArgs) -> Result<()> {
    if args.out.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            args.out.display()
        ));
    }
    let stub = config_stub();
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&args.out, format!("{stub}\n"))
        .with_context(|| format!("write {}", args.out.display()))?;
    eprintln!("Wrote config to {}", args.out.display());
    Ok(())
}
