//! Step line composition.
//!
//! A step line is the lead-in ("Given ", "And ", ...) followed by the step
//! template with every placeholder replaced by its captured argument.
use super::format::escape_html;
use crate::step::{StepOutcome, StepType};
use regex::Regex;
use std::ops::Range;

const CONTINUATION: &str = "And ";

/// Rendered step line plus any placeholder/argument disagreement found.
pub(crate) struct ComposedStep {
    pub(crate) markup: String,
    pub(crate) mismatch: Option<ArgumentMismatch>,
}

/// Count disagreement between template placeholders and captured arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ArgumentMismatch {
    pub(crate) placeholders: usize,
    pub(crate) arguments: usize,
}

/// `previous` is the comparison key of the step rendered just before this
/// one in the same scenario.
pub(crate) fn lead_in(step_type: StepType, previous: Option<StepType>) -> String {
    if previous == Some(step_type) {
        CONTINUATION.to_string()
    } else {
        format!("{} ", step_type.capitalized())
    }
}

pub(crate) fn compose_step(
    outcome: StepOutcome,
    step_type: StepType,
    template: &str,
    pattern: Option<&Regex>,
    args: &[String],
    previous: Option<StepType>,
) -> ComposedStep {
    let spans = match pattern {
        Some(pattern) => placeholder_spans(template, pattern),
        None => Vec::new(),
    };
    let mismatch = (spans.len() != args.len()).then_some(ArgumentMismatch {
        placeholders: spans.len(),
        arguments: args.len(),
    });

    let mut inner = lead_in(step_type, previous);
    inner.push_str(&substitute(template, &spans, args));
    ComposedStep {
        markup: step_item(outcome, &inner),
        mismatch,
    }
}

fn placeholder_spans(template: &str, pattern: &Regex) -> Vec<Range<usize>> {
    pattern
        .find_iter(template)
        .filter(|found| !found.is_empty())
        .map(|found| found.range())
        .collect()
}

/// Zip placeholder spans with arguments in order. A placeholder without an
/// argument renders as an empty param span; surplus arguments are dropped.
fn substitute(template: &str, spans: &[Range<usize>], args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    for (idx, span) in spans.iter().enumerate() {
        out.push_str(&escape_html(&template[cursor..span.start]));
        let value = args.get(idx).map(String::as_str).unwrap_or_default();
        out.push_str(&param_span(value));
        cursor = span.end;
    }
    out.push_str(&escape_html(&template[cursor..]));
    out
}

fn param_span(value: &str) -> String {
    format!("<span class=\"param\">{}</span>", escape_html(value))
}

fn step_item(outcome: StepOutcome, inner: &str) -> String {
    format!(
        "                  <li class=\"{}\">{}</li>\n",
        outcome.css_class(),
        inner
    )
}
