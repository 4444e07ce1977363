//! XHTML story report writer.
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::listener::StoryListener;
use crate::render::{
    append_document_close, append_document_head, append_stock_steps, append_story_block,
    append_summary, ErrorRecord, PlaceholderPatterns, RunSummary,
};
use crate::scenario::ScenarioOutcome;
use crate::session::RunSession;
use crate::step::{StepDescription, StepOutcome, StepType};
use std::io::Write;

/// Streams a story report into `sink`.
///
/// The document shell is written on `run_started`; each story block is
/// written once its `story_ended` arrives; the summary and document close are
/// written on `run_ended`. Render state lives in a session that exists only
/// between those two notifications, so one reporter can render several runs
/// back to back.
pub struct HtmlReporter<W: Write> {
    sink: W,
    config: ReportConfig,
    patterns: PlaceholderPatterns,
    session: Option<RunSession>,
    summary: Option<RunSummary>,
}

impl<W: Write> HtmlReporter<W> {
    pub fn new(sink: W, config: ReportConfig) -> Result<Self, ReportError> {
        let patterns = PlaceholderPatterns::new(&config.placeholder_pattern)?;
        Ok(Self {
            sink,
            config,
            patterns,
            session: None,
            summary: None,
        })
    }

    /// Summary of the most recently completed run.
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn emit(&mut self, fragment: &str) -> Result<(), ReportError> {
        self.sink.write_all(fragment.as_bytes())?;
        Ok(())
    }

    fn step(
        &mut self,
        outcome: StepOutcome,
        step_type: StepType,
        description: &StepDescription,
        args: &[String],
        notification: &'static str,
    ) -> Result<(), ReportError> {
        let session = active(&mut self.session, notification)?;
        let pattern = match self.patterns.resolve(description.arg_pattern.as_deref()) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                tracing::warn!(step = %description.name, error = %err, "placeholder pattern rejected");
                session.warn(format!("step {:?}: {err}", description.name));
                None
            }
        };
        let mismatch = session.render_step(
            outcome,
            step_type,
            &description.name,
            pattern,
            args,
            notification,
        )?;
        if let Some(mismatch) = mismatch {
            tracing::warn!(
                step = %description.name,
                step_type = %step_type,
                placeholders = mismatch.placeholders,
                arguments = mismatch.arguments,
                "placeholder count differs from captured arguments"
            );
            session.warn(format!(
                "step {:?}: {} placeholders, {} arguments",
                description.name, mismatch.placeholders, mismatch.arguments
            ));
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        requested: ScenarioOutcome,
        reason: Option<&str>,
        error: Option<&ErrorRecord>,
        notification: &'static str,
    ) -> Result<(), ReportError> {
        let session = active(&mut self.session, notification)?;
        if let Some(outcome) = session.resolve_scenario(requested, reason, error, notification)? {
            tracing::debug!(outcome = outcome.css_class(), notification, "scenario resolved");
        }
        Ok(())
    }
}

fn active<'a>(
    session: &'a mut Option<RunSession>,
    notification: &'static str,
) -> Result<&'a mut RunSession, ReportError> {
    session
        .as_mut()
        .ok_or(ReportError::NoActiveRun { notification })
}

impl<W: Write> StoryListener for HtmlReporter<W> {
    fn run_started(&mut self, count: usize) -> Result<(), ReportError> {
        if self.session.is_some() {
            return Err(ReportError::RunAlreadyStarted);
        }
        tracing::info!(scenarios = count, "run started");
        let mut out = String::new();
        append_document_head(&mut out, &self.config);
        self.emit(&out)?;
        self.session = Some(RunSession::new(count));
        self.summary = None;
        Ok(())
    }

    fn collected_steps(&mut self, steps: &[String]) -> Result<(), ReportError> {
        active(&mut self.session, "collected_steps")?;
        let mut out = String::new();
        append_stock_steps(&mut out, steps);
        self.emit(&out)
    }

    fn story_started(&mut self, title: &str, narrative: &str) -> Result<(), ReportError> {
        let session = active(&mut self.session, "story_started")?;
        session.open_story(title, narrative)?;
        tracing::debug!(story = title, "story started");
        Ok(())
    }

    fn story_ended(&mut self, _title: &str, _narrative: &str) -> Result<(), ReportError> {
        let session = active(&mut self.session, "story_ended")?;
        let story = session.close_story()?;
        tracing::debug!(story = %story.title, failed = story.failed, "story ended");
        let mut out = String::new();
        append_story_block(&mut out, story.failed, &story.body);
        self.emit(&out)
    }

    fn scenario_started(
        &mut self,
        _story_title: &str,
        scenario_name: &str,
    ) -> Result<(), ReportError> {
        let session = active(&mut self.session, "scenario_started")?;
        session.open_scenario(scenario_name)
    }

    fn scenario_succeeded(
        &mut self,
        _story_title: &str,
        _scenario_name: &str,
    ) -> Result<(), ReportError> {
        self.resolve(
            ScenarioOutcome::Succeeded,
            None,
            None,
            "scenario_succeeded",
        )
    }

    fn scenario_pending(
        &mut self,
        _story_title: &str,
        _scenario_name: &str,
        reason: &str,
    ) -> Result<(), ReportError> {
        self.resolve(
            ScenarioOutcome::Pending,
            Some(reason),
            None,
            "scenario_pending",
        )
    }

    fn scenario_failed(
        &mut self,
        _story_title: &str,
        _scenario_name: &str,
        error: &ErrorRecord,
    ) -> Result<(), ReportError> {
        self.resolve(
            ScenarioOutcome::Failed,
            None,
            Some(error),
            "scenario_failed",
        )
    }

    fn step_succeeded(
        &mut self,
        step_type: StepType,
        description: &StepDescription,
        args: &[String],
    ) -> Result<(), ReportError> {
        self.step(
            StepOutcome::Passed,
            step_type,
            description,
            args,
            "step_succeeded",
        )
    }

    fn step_pending(
        &mut self,
        step_type: StepType,
        description: &StepDescription,
        args: &[String],
    ) -> Result<(), ReportError> {
        self.step(
            StepOutcome::Pending,
            step_type,
            description,
            args,
            "step_pending",
        )
    }

    fn step_failed(
        &mut self,
        step_type: StepType,
        description: &StepDescription,
        args: &[String],
    ) -> Result<(), ReportError> {
        self.step(
            StepOutcome::Failed,
            step_type,
            description,
            args,
            "step_failed",
        )
    }

    fn run_ended(&mut self) -> Result<(), ReportError> {
        let session = self.session.take().ok_or(ReportError::NoActiveRun {
            notification: "run_ended",
        })?;
        let summary = session.finish()?;
        let mut out = String::new();
        append_summary(&mut out, &summary);
        append_document_close(&mut out);
        self.emit(&out)?;
        self.sink.flush()?;
        tracing::info!(
            scenarios = summary.scenario_count,
            succeeded = summary.succeeded,
            failed = summary.failed,
            pending = summary.pending,
            warnings = summary.warnings.len(),
            "run complete"
        );
        self.summary = Some(summary);
        Ok(())
    }
}
