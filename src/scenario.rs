//! Scenario resolution state machine.
//!
//! A scenario resolves exactly once. Step-level pending/failed notifications
//! only raise a floor for the outcome; the first scenario-level terminal
//! notification resolves it, and every later terminal notification is a no-op.
use crate::render::{scenario_header, ErrorRecord, PendingRecord};
use crate::step::{StepOutcome, StepType};

/// Terminal outcome, ordered by severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ScenarioOutcome {
    Succeeded,
    Pending,
    Failed,
}

impl ScenarioOutcome {
    pub(crate) fn css_class(self) -> &'static str {
        match self {
            ScenarioOutcome::Succeeded => "passed",
            ScenarioOutcome::Pending => "pending",
            ScenarioOutcome::Failed => "failed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    Open,
    Resolved(ScenarioOutcome),
}

pub(crate) struct ScenarioState {
    pub(crate) story_title: String,
    pub(crate) name: String,
    pub(crate) body: String,
    /// Comparison key of the last rendered step.
    pub(crate) previous_type: Option<StepType>,
    resolution: Resolution,
    step_floor: Option<ScenarioOutcome>,
    failed_step: Option<String>,
    pending_steps: Vec<PendingRecord>,
}

impl ScenarioState {
    pub(crate) fn new(story_title: &str, name: &str) -> Self {
        Self {
            story_title: story_title.to_string(),
            name: name.to_string(),
            body: scenario_header(name),
            previous_type: None,
            resolution: Resolution::Open,
            step_floor: None,
            failed_step: None,
            pending_steps: Vec::new(),
        }
    }

    pub(crate) fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub(crate) fn is_open(&self) -> bool {
        self.resolution == Resolution::Open
    }

    /// Record a step-level outcome ahead of the scenario's own terminal
    /// notification.
    pub(crate) fn note_step(&mut self, outcome: StepOutcome, step_text: &str) {
        let floor = match outcome {
            StepOutcome::Passed => return,
            StepOutcome::Pending => {
                self.pending_steps.push(PendingRecord {
                    story_title: self.story_title.clone(),
                    scenario_name: self.name.clone(),
                    message: step_text.to_string(),
                });
                ScenarioOutcome::Pending
            }
            StepOutcome::Failed => {
                if self.failed_step.is_none() {
                    self.failed_step = Some(step_text.to_string());
                }
                ScenarioOutcome::Failed
            }
        };
        self.step_floor = Some(self.step_floor.map_or(floor, |current| current.max(floor)));
    }

    /// Resolve the scenario. Returns `None` when it was already resolved.
    pub(crate) fn resolve(&mut self, requested: ScenarioOutcome) -> Option<ScenarioOutcome> {
        if !self.is_open() {
            return None;
        }
        let outcome = self
            .step_floor
            .map_or(requested, |floor| floor.max(requested));
        self.resolution = Resolution::Resolved(outcome);
        Some(outcome)
    }

    /// Pending step records, released once the scenario resolved pending.
    pub(crate) fn take_pending_steps(&mut self) -> Vec<PendingRecord> {
        std::mem::take(&mut self.pending_steps)
    }

    /// Error for a scenario failed by one of its steps rather than by an
    /// error the runner reported.
    pub(crate) fn step_failure_error(&self) -> ErrorRecord {
        let step = self.failed_step.as_deref().unwrap_or_default();
        ErrorRecord::new("StepFailed", format!("step failed: {step}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> ScenarioState {
        ScenarioState::new("Login", "Valid login")
    }

    #[test]
    fn first_terminal_wins() {
        let mut state = scenario();
        assert_eq!(
            state.resolve(ScenarioOutcome::Succeeded),
            Some(ScenarioOutcome::Succeeded)
        );
        assert_eq!(state.resolve(ScenarioOutcome::Failed), None);
        assert_eq!(
            state.resolution(),
            Resolution::Resolved(ScenarioOutcome::Succeeded)
        );
    }

    #[test]
    fn pending_step_then_scenario_failure_resolves_failed() {
        let mut state = scenario();
        state.note_step(StepOutcome::Pending, "I enter a captcha");
        assert_eq!(
            state.resolve(ScenarioOutcome::Failed),
            Some(ScenarioOutcome::Failed)
        );
        assert_eq!(state.resolve(ScenarioOutcome::Pending), None);
    }

    #[test]
    fn step_outcomes_preempt_scenario_success() {
        let mut pending = scenario();
        pending.note_step(StepOutcome::Pending, "I enter a captcha");
        assert_eq!(
            pending.resolve(ScenarioOutcome::Succeeded),
            Some(ScenarioOutcome::Pending)
        );

        let mut failed = scenario();
        failed.note_step(StepOutcome::Failed, "I see the dashboard");
        failed.note_step(StepOutcome::Pending, "I log out");
        assert_eq!(
            failed.resolve(ScenarioOutcome::Succeeded),
            Some(ScenarioOutcome::Failed)
        );
        assert_eq!(
            failed.step_failure_error().message,
            "step failed: I see the dashboard"
        );
    }

    #[test]
    fn passed_steps_leave_no_floor() {
        let mut state = scenario();
        state.note_step(StepOutcome::Passed, "I visit the login page");
        assert!(state.take_pending_steps().is_empty());
        assert_eq!(
            state.resolve(ScenarioOutcome::Succeeded),
            Some(ScenarioOutcome::Succeeded)
        );
    }

    #[test]
    fn pending_steps_carry_story_context() {
        let mut state = scenario();
        state.note_step(StepOutcome::Pending, "I enter a captcha");
        let records = state.take_pending_steps();
        assert_eq!(
            records,
            vec![PendingRecord {
                story_title: "Login".to_string(),
                scenario_name: "Valid login".to_string(),
                message: "I enter a captcha".to_string(),
            }]
        );
    }
}
