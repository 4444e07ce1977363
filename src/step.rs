//! Step vocabulary shared by the listener contract and the compositor.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a step plays inside a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepType {
    #[serde(rename = "given")]
    Given,
    /// A given step that replays another scenario as its precondition.
    #[serde(rename = "given scenario", alias = "given_scenario")]
    GivenScenario,
    #[serde(rename = "when")]
    When,
    #[serde(rename = "then")]
    Then,
}

impl StepType {
    pub fn label(self) -> &'static str {
        match self {
            StepType::Given => "given",
            StepType::GivenScenario => "given scenario",
            StepType::When => "when",
            StepType::Then => "then",
        }
    }

    /// Type recorded as "previous" once this step has been rendered.
    ///
    /// A replayed scenario counts as a plain given, so a given step right
    /// after it reads as a continuation.
    pub fn comparison_key(self) -> StepType {
        match self {
            StepType::GivenScenario => StepType::Given,
            StepType::Given => StepType::Given,
            StepType::When => StepType::When,
            StepType::Then => StepType::Then,
        }
    }

    /// Display label with the first letter capitalized.
    pub fn capitalized(self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observed result of a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Passed,
    Pending,
    Failed,
}

impl StepOutcome {
    pub fn css_class(self) -> &'static str {
        match self {
            StepOutcome::Passed => "passed",
            StepOutcome::Pending => "pending",
            StepOutcome::Failed => "failed",
        }
    }
}

/// Step text as registered with the runner.
///
/// `name` holds placeholders such as `$login`; `arg_pattern` overrides the
/// configured placeholder regex for this step when set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_pattern: Option<String>,
}

impl StepDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg_pattern: None,
        }
    }

    pub fn with_pattern(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg_pattern: Some(pattern.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_scenario_compares_as_given() {
        assert_eq!(StepType::GivenScenario.comparison_key(), StepType::Given);
        for step_type in [StepType::Given, StepType::When, StepType::Then] {
            assert_eq!(step_type.comparison_key(), step_type);
        }
    }

    #[test]
    fn capitalizes_only_first_letter() {
        assert_eq!(StepType::When.capitalized(), "When");
        assert_eq!(StepType::GivenScenario.capitalized(), "Given scenario");
    }

    #[test]
    fn serde_uses_runner_labels() {
        let parsed: StepType = serde_json::from_str("\"given scenario\"").unwrap();
        assert_eq!(parsed, StepType::GivenScenario);
        let alias: StepType = serde_json::from_str("\"given_scenario\"").unwrap();
        assert_eq!(alias, StepType::GivenScenario);
        assert!(serde_json::from_str::<StepType>("\"and\"").is_err());
        assert_eq!(serde_json::to_string(&StepType::Then).unwrap(), "\"then\"");
    }
}
