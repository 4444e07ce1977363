//! Errors raised while consuming story runner notifications.
use thiserror::Error;

/// Failure modes for a single notification.
///
/// Ordering variants mean the upstream runner broke the nesting contract;
/// they are reported instead of guessed around.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{notification} received outside of a run")]
    NoActiveRun { notification: &'static str },

    #[error("run_started received while a run is already in progress")]
    RunAlreadyStarted,

    #[error("{notification} received with no open story")]
    NoOpenStory { notification: &'static str },

    #[error("story {title:?} started while story {open:?} is still open")]
    StoryStillOpen { title: String, open: String },

    #[error("run ended while story {title:?} is still open")]
    UnclosedStory { title: String },

    #[error("{notification} received with no open scenario")]
    NoOpenScenario { notification: &'static str },

    #[error("scenario {name:?} never received a terminal notification")]
    ScenarioStillOpen { name: String },

    #[error("invalid placeholder pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("malformed event on line {line}")]
    Event {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("write report output")]
    Io(#[from] std::io::Error),
}
