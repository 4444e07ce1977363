//! Serialized form of listener notifications.
//!
//! Runners that cannot call a [`StoryListener`] in-process write one JSON
//! object per line, tagged by `event`, and the stream is replayed later.
use crate::error::ReportError;
use crate::listener::StoryListener;
use crate::render::ErrorRecord;
use crate::step::{StepDescription, StepType};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoryEvent {
    RunStarted {
        count: usize,
    },
    CollectedSteps {
        #[serde(default)]
        steps: Vec<String>,
    },
    StoryStarted {
        title: String,
        #[serde(default)]
        narrative: String,
    },
    StoryEnded {
        title: String,
        #[serde(default)]
        narrative: String,
    },
    ScenarioStarted {
        story_title: String,
        scenario_name: String,
    },
    ScenarioSucceeded {
        story_title: String,
        scenario_name: String,
    },
    ScenarioPending {
        story_title: String,
        scenario_name: String,
        #[serde(default)]
        reason: String,
    },
    ScenarioFailed {
        story_title: String,
        scenario_name: String,
        #[serde(default)]
        error: ErrorRecord,
    },
    FoundScenario {
        step_type: StepType,
        description: String,
    },
    StepUpcoming {
        step_type: StepType,
        description: StepDescription,
        #[serde(default)]
        args: Vec<String>,
    },
    StepSucceeded {
        step_type: StepType,
        description: StepDescription,
        #[serde(default)]
        args: Vec<String>,
    },
    StepPending {
        step_type: StepType,
        description: StepDescription,
        #[serde(default)]
        args: Vec<String>,
    },
    StepFailed {
        step_type: StepType,
        description: StepDescription,
        #[serde(default)]
        args: Vec<String>,
    },
    RunEnded,
}

/// Parse one line of an event log. Blank lines yield `None`.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_event_line(line: &str, line_no: usize) -> Result<Option<StoryEvent>, ReportError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| ReportError::Event {
            line: line_no,
            source,
        })
}

/// Deliver a single event to a listener.
pub fn dispatch<L>(listener: &mut L, event: &StoryEvent) -> Result<(), ReportError>
where
    L: StoryListener + ?Sized,
{
    match event {
        StoryEvent::RunStarted { count } => listener.run_started(*count),
        StoryEvent::CollectedSteps { steps } => listener.collected_steps(steps),
        StoryEvent::StoryStarted { title, narrative } => listener.story_started(title, narrative),
        StoryEvent::StoryEnded { title, narrative } => listener.story_ended(title, narrative),
        StoryEvent::ScenarioStarted {
            story_title,
            scenario_name,
        } => listener.scenario_started(story_title, scenario_name),
        StoryEvent::ScenarioSucceeded {
            story_title,
            scenario_name,
        } => listener.scenario_succeeded(story_title, scenario_name),
        StoryEvent::ScenarioPending {
            story_title,
            scenario_name,
            reason,
        } => listener.scenario_pending(story_title, scenario_name, reason),
        StoryEvent::ScenarioFailed {
            story_title,
            scenario_name,
            error,
        } => listener.scenario_failed(story_title, scenario_name, error),
        StoryEvent::FoundScenario {
            step_type,
            description,
        } => listener.found_scenario(*step_type, description),
        StoryEvent::StepUpcoming {
            step_type,
            description,
            args,
        } => listener.step_upcoming(*step_type, description, args),
        StoryEvent::StepSucceeded {
            step_type,
            description,
            args,
        } => listener.step_succeeded(*step_type, description, args),
        StoryEvent::StepPending {
            step_type,
            description,
            args,
        } => listener.step_pending(*step_type, description, args),
        StoryEvent::StepFailed {
            step_type,
            description,
            args,
        } => listener.step_failed(*step_type, description, args),
        StoryEvent::RunEnded => listener.run_ended(),
    }
}
