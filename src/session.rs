//! Per-run render state.
//!
//! One `RunSession` exists between `run_started` and `run_ended`. It owns the
//! open story and scenario buffers, the counters and the detail lists.
use crate::error::ReportError;
use crate::render::{
    append_scenario_block, compose_step, story_header, ArgumentMismatch, ErrorRecord,
    FailureRecord, PendingRecord, RunSummary,
};
use crate::scenario::{ScenarioOutcome, ScenarioState};
use crate::step::{StepOutcome, StepType};
use regex::Regex;

const SUMMARY_SCHEMA_VERSION: u32 = 1;

#[derive(Debug)]
pub(crate) struct StoryState {
    pub(crate) title: String,
    pub(crate) failed: bool,
    pub(crate) body: String,
}

pub(crate) struct RunSession {
    expected: usize,
    succeeded: usize,
    pending: usize,
    pending_steps: Vec<PendingRecord>,
    failures: Vec<FailureRecord>,
    warnings: Vec<String>,
    story: Option<StoryState>,
    scenario: Option<ScenarioState>,
}

impl RunSession {
    pub(crate) fn new(expected: usize) -> Self {
        Self {
            expected,
            succeeded: 0,
            pending: 0,
            pending_steps: Vec::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
            story: None,
            scenario: None,
        }
    }

    pub(crate) fn warn(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub(crate) fn open_story(&mut self, title: &str, narrative: &str) -> Result<(), ReportError> {
        if let Some(open) = self.story.as_ref() {
            return Err(ReportError::StoryStillOpen {
                title: title.to_string(),
                open: open.title.clone(),
            });
        }
        self.scenario = None;
        self.story = Some(StoryState {
            title: title.to_string(),
            failed: false,
            body: story_header(title, narrative),
        });
        Ok(())
    }

    /// Close the open story and hand back its sealed parts.
    pub(crate) fn close_story(&mut self) -> Result<StoryState, ReportError> {
        self.ensure_scenario_resolved()?;
        self.scenario = None;
        self.story.take().ok_or(ReportError::NoOpenStory {
            notification: "story_ended",
        })
    }

    pub(crate) fn open_scenario(&mut self, scenario_name: &str) -> Result<(), ReportError> {
        self.ensure_scenario_resolved()?;
        let story = self.story.as_ref().ok_or(ReportError::NoOpenStory {
            notification: "scenario_started",
        })?;
        self.scenario = Some(ScenarioState::new(&story.title, scenario_name));
        Ok(())
    }

    pub(crate) fn render_step(
        &mut self,
        outcome: StepOutcome,
        step_type: StepType,
        template: &str,
        pattern: Option<&Regex>,
        args: &[String],
        notification: &'static str,
    ) -> Result<Option<ArgumentMismatch>, ReportError> {
        let scenario = self
            .scenario
            .as_mut()
            .filter(|scenario| scenario.is_open())
            .ok_or(ReportError::NoOpenScenario { notification })?;
        let composed = compose_step(
            outcome,
            step_type,
            template,
            pattern,
            args,
            scenario.previous_type,
        );
        scenario.body.push_str(&composed.markup);
        scenario.previous_type = Some(step_type.comparison_key());
        scenario.note_step(outcome, template);
        Ok(composed.mismatch)
    }

    /// Apply a scenario-level terminal notification.
    ///
    /// Returns the resolved outcome, or `None` if the scenario had already
    /// resolved and this notification only repeats it.
    pub(crate) fn resolve_scenario(
        &mut self,
        requested: ScenarioOutcome,
        reason: Option<&str>,
        error: Option<&ErrorRecord>,
        notification: &'static str,
    ) -> Result<Option<ScenarioOutcome>, ReportError> {
        let story = self
            .story
            .as_mut()
            .ok_or(ReportError::NoOpenStory { notification })?;
        let scenario = self
            .scenario
            .as_mut()
            .ok_or(ReportError::NoOpenScenario { notification })?;
        let Some(outcome) = scenario.resolve(requested) else {
            // A late failure still fails the story; counters stay as first resolved.
            if requested == ScenarioOutcome::Failed {
                story.failed = true;
            }
            tracing::debug!(
                scenario = %scenario.name,
                resolution = ?scenario.resolution(),
                notification,
                "scenario already resolved"
            );
            return Ok(None);
        };

        let pending_steps = scenario.take_pending_steps();
        match outcome {
            ScenarioOutcome::Succeeded => self.succeeded += 1,
            ScenarioOutcome::Pending => {
                self.pending += 1;
                if pending_steps.is_empty() {
                    self.pending_steps.push(PendingRecord {
                        story_title: scenario.story_title.clone(),
                        scenario_name: scenario.name.clone(),
                        message: reason.unwrap_or_default().to_string(),
                    });
                } else {
                    self.pending_steps.extend(pending_steps);
                }
            }
            ScenarioOutcome::Failed => {
                let error = match error {
                    Some(error) if requested == ScenarioOutcome::Failed => error.clone(),
                    _ => scenario.step_failure_error(),
                };
                self.failures.push(FailureRecord {
                    story_title: scenario.story_title.clone(),
                    scenario_name: scenario.name.clone(),
                    error,
                });
                story.failed = true;
            }
        }
        append_scenario_block(&mut story.body, outcome, &scenario.body);
        Ok(Some(outcome))
    }

    /// Finish the run. Fails if a story is still open.
    pub(crate) fn finish(mut self) -> Result<RunSummary, ReportError> {
        self.ensure_scenario_resolved()?;
        if let Some(story) = self.story.take() {
            return Err(ReportError::UnclosedStory { title: story.title });
        }
        Ok(RunSummary {
            schema_version: SUMMARY_SCHEMA_VERSION,
            scenario_count: self.expected,
            succeeded: self.succeeded,
            failed: self.failures.len(),
            pending: self.pending,
            pending_steps: self.pending_steps,
            failures: self.failures,
            warnings: self.warnings,
        })
    }

    fn ensure_scenario_resolved(&self) -> Result<(), ReportError> {
        match self.scenario.as_ref() {
            Some(scenario) if scenario.is_open() => Err(ReportError::ScenarioStillOpen {
                name: scenario.name.clone(),
            }),
            _ => Ok(()),
        }
    }
}
