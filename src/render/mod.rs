//! XHTML assembly for story runs.
//!
//! Fragments nest as document, story blocks, scenario blocks, step lines and
//! a trailing summary. Blocks are emitted in the order they are sealed.
use serde::Serialize;

mod compile;
mod compose;
mod format;
mod model;

pub(crate) use compile::PlaceholderPatterns;
pub(crate) use compose::{compose_step, ArgumentMismatch};
pub(crate) use format::{
    append_document_close, append_document_head, append_scenario_block, append_stock_steps,
    append_story_block, append_summary, scenario_header, story_header,
};
pub use format::escape_html;
pub use model::{ErrorRecord, FailureRecord, PendingRecord};

pub(crate) use compile::compile_regex;

/// Run-level totals and detail lists, as rendered in the trailing summary.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub schema_version: u32,
    /// Scenario count announced by the runner at run start.
    pub scenario_count: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub pending: usize,
    pub pending_steps: Vec<PendingRecord>,
    pub failures: Vec<FailureRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl RunSummary {
    /// Number of scenarios that reached a terminal outcome.
    pub fn resolved(&self) -> usize {
        self.succeeded + self.failed + self.pending
    }

    pub fn headline(&self) -> String {
        format!(
            "{} scenarios: {} succeeded, {} failed, {} pending",
            self.scenario_count, self.succeeded, self.failed, self.pending
        )
    }
}
