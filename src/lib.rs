//! HTML reporting for story runner lifecycle events.
//!
//! A story runner walks runs, stories, scenarios and steps in execution order
//! and notifies a [`StoryListener`]. [`HtmlReporter`] turns that notification
//! stream into a single XHTML document with per-level pass/fail/pending
//! classes and a trailing run summary.
pub mod config;
pub mod error;
pub mod event;
pub mod listener;
pub mod render;
pub mod reporter;
mod scenario;
mod session;
pub mod step;

pub use config::ReportConfig;
pub use error::ReportError;
pub use event::{dispatch, parse_event_line, StoryEvent};
pub use listener::StoryListener;
pub use render::{ErrorRecord, FailureRecord, PendingRecord, RunSummary};
pub use reporter::HtmlReporter;
pub use step::{StepDescription, StepOutcome, StepType};
