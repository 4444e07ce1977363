use crate::error::ReportError;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Placeholder regexes keyed by their source pattern.
///
/// Steps usually share the configured default; per-step overrides are
/// compiled once and reused for the rest of the run.
pub(crate) struct PlaceholderPatterns {
    default: Regex,
    overrides: HashMap<String, Regex>,
}

impl PlaceholderPatterns {
    pub(crate) fn new(default_pattern: &str) -> Result<Self, ReportError> {
        Ok(Self {
            default: compile_regex(default_pattern)?,
            overrides: HashMap::new(),
        })
    }

    pub(crate) fn resolve(&mut self, pattern: Option<&str>) -> Result<&Regex, ReportError> {
        let Some(pattern) = pattern else {
            return Ok(&self.default);
        };
        if !self.overrides.contains_key(pattern) {
            let regex = compile_regex(pattern)?;
            self.overrides.insert(pattern.to_string(), regex);
        }
        Ok(&self.overrides[pattern])
    }
}

pub(crate) fn compile_regex(pattern: &str) -> Result<Regex, ReportError> {
    RegexBuilder::new(pattern)
        .build()
        .map_err(|source| ReportError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}
