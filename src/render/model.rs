use serde::{Deserialize, Serialize};

/// Error reported by the runner for a failed scenario.
///
/// Fields are displayed verbatim; any that the runner omits render empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(default, alias = "class")]
    pub category: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub backtrace: Vec<String>,
}

impl ErrorRecord {
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
            backtrace: Vec::new(),
        }
    }

    pub fn with_backtrace<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backtrace = frames.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PendingRecord {
    pub story_title: String,
    pub scenario_name: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub story_title: String,
    pub scenario_name: String,
    pub error: ErrorRecord,
}
