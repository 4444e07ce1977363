use super::model::{FailureRecord, PendingRecord};
use super::RunSummary;
use crate::config::ReportConfig;
use crate::scenario::ScenarioOutcome;

pub(crate) fn append_document_head(out: &mut String, config: &ReportConfig) {
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<!DOCTYPE html\n");
    out.push_str("  PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\"\n");
    out.push_str("  \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">\n");
    out.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\" xml:lang=\"en\" lang=\"en\">\n");
    out.push_str("  <head>\n");
    out.push_str(&format!("    <title>{}</title>\n", escape_html(&config.title)));
    out.push_str(
        "    <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\n",
    );
    out.push_str("    <meta http-equiv=\"Expires\" content=\"-1\" />\n");
    out.push_str("    <meta http-equiv=\"Pragma\" content=\"no-cache\" />\n");
    for script in &config.scripts {
        out.push_str(&format!(
            "    <script src=\"{}\" type=\"text/javascript\"></script>\n",
            escape_html(script)
        ));
    }
    for stylesheet in &config.stylesheets {
        out.push_str(&format!(
            "    <link href=\"{}\" rel=\"stylesheet\" type=\"text/css\" />\n",
            escape_html(stylesheet)
        ));
    }
    out.push_str("  </head>\n");
    out.push_str("  <body>\n");
    out.push_str("    <div id=\"container\">\n");
}

pub(crate) fn append_stock_steps(out: &mut String, steps: &[String]) {
    if steps.is_empty() {
        return;
    }
    out.push_str("      <ul id=\"stock_steps\" style=\"display: none;\">\n");
    for step in steps {
        out.push_str(&format!("        <li>{}</li>\n", escape_html(step)));
    }
    out.push_str("      </ul>\n");
}

pub(crate) fn story_header(title: &str, narrative: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("        <dt>Story: {}</dt>\n", escape_html(title)));
    out.push_str("        <dd>\n");
    out.push_str("          <p>\n");
    out.push_str(&format!("            {}\n", narrative_to_markup(narrative)));
    out.push_str("          </p>\n");
    out
}

pub(crate) fn append_story_block(out: &mut String, failed: bool, body: &str) {
    let class = if failed { "story failed" } else { "story passed" };
    out.push_str(&format!("      <dl class=\"{class}\">\n"));
    out.push_str(body);
    out.push_str("        </dd>\n");
    out.push_str("      </dl>\n");
}

pub(crate) fn scenario_header(name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "              <dt>Scenario: {}</dt>\n",
        escape_html(name)
    ));
    out.push_str("              <dd>\n");
    out.push_str("                <ul class=\"steps\">\n");
    out
}

pub(crate) fn append_scenario_block(out: &mut String, outcome: ScenarioOutcome, body: &str) {
    out.push_str(&format!(
        "            <dl class=\"{}\">\n",
        outcome.css_class()
    ));
    out.push_str(body);
    out.push_str("                </ul>\n");
    out.push_str("              </dd>\n");
    out.push_str("            </dl>\n");
}

pub(crate) fn append_summary(out: &mut String, summary: &RunSummary) {
    out.push_str("      <p class=\"trace\">\n");
    out.push_str(&format!("{} <br/>\n", summary.headline()));
    append_pending_section(out, &summary.pending_steps);
    append_failures_section(out, &summary.failures);
    out.push_str("      </p>\n");
}

fn append_pending_section(out: &mut String, pending: &[PendingRecord]) {
    if pending.is_empty() {
        return;
    }
    out.push_str("\nPending Steps: <br/>\n");
    for (idx, record) in pending.iter().enumerate() {
        out.push_str(&format!(
            "{}) {} ({}): {} <br/>\n",
            idx + 1,
            escape_html(&record.story_title),
            escape_html(&record.scenario_name),
            escape_html(&record.message)
        ));
    }
}

fn append_failures_section(out: &mut String, failures: &[FailureRecord]) {
    if failures.is_empty() {
        return;
    }
    out.push_str("\nFAILURES: <br/>\n");
    for (idx, failure) in failures.iter().enumerate() {
        out.push_str(&format!(
            "{}) {} ({}) FAILED <br/>\n",
            idx + 1,
            escape_html(&failure.story_title),
            escape_html(&failure.scenario_name)
        ));
        out.push_str(&format!(
            "{}: {} <br/>\n",
            escape_html(&failure.error.category),
            escape_html(&failure.error.message)
        ));
        if !failure.error.backtrace.is_empty() {
            let frames: Vec<String> = failure
                .error
                .backtrace
                .iter()
                .map(String::as_str)
                .map(escape_html)
                .collect();
            out.push_str(&frames.join("<br/>\n"));
            out.push_str(" <br/>\n");
        }
    }
}

pub(crate) fn append_document_close(out: &mut String) {
    out.push_str("    </div>\n");
    out.push_str("  </body>\n");
    out.push_str("</html>\n");
}

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn narrative_to_markup(narrative: &str) -> String {
    escape_html(narrative)
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect::<Vec<_>>()
        .join("<br />")
}
