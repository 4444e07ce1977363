//! End-to-end rendering of recorded event logs.

mod common;

use common::{binary, TestFixture};
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

#[test]
fn login_run_renders_every_level() {
    let fixture = TestFixture::load("login").expect("Failed to load login fixture");
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let result = fixture.render(temp_dir.path()).expect("render login");
    fixture.assert_matches(&result);

    assert!(result.report.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(result
        .report
        .contains("<script src=\"javascripts/rspec.js\" type=\"text/javascript\"></script>"));
    assert_eq!(result.report.matches("id=\"stock_steps\"").count(), 1);
    assert!(result.report.trim_end().ends_with("</html>"));
    assert_eq!(result.summary["scenario_count"], 3);
    assert_eq!(
        result.summary["failures"][0]["error"]["backtrace"][1],
        "stories/login.rb:3"
    );
    assert!(result.output.stdout.is_empty());
}

#[test]
fn duplicate_terminal_notifications_count_once() {
    let fixture =
        TestFixture::load("pending_then_failed").expect("Failed to load pending_then_failed");
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let result = fixture.render(temp_dir.path()).expect("render pending_then_failed");
    fixture.assert_matches(&result);
    assert_eq!(result.report.matches("<dl class=\"failed\">").count(), 1);
    assert_eq!(
        result.summary["pending_steps"]
            .as_array()
            .map(|records| records.len()),
        Some(0)
    );
}

#[test]
fn stdin_events_render_to_stdout() {
    let fixture = TestFixture::load("login").expect("Failed to load login fixture");
    let events = fs::read(fixture.events_path()).expect("read events");

    let mut child = Command::new(binary())
        .args(["render", "--events", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn story-report");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(&events)
        .expect("write events");
    let output = child.wait_with_output().expect("wait for story-report");
    assert!(output.status.success());

    let report = String::from_utf8(output.stdout).expect("utf-8 report");
    assert!(report.contains(&fixture.config.headline));
}

#[test]
fn truncated_log_fails_without_publishing() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let events = temp_dir.path().join("events.jsonl");
    fs::write(
        &events,
        "{\"event\":\"run_started\",\"count\":1}\n{\"event\":\"story_started\",\"title\":\"Login\"}\n",
    )
    .expect("write events");
    let report = temp_dir.path().join("report.html");

    let output = Command::new(binary())
        .arg("render")
        .arg("--events")
        .arg(&events)
        .arg("--out")
        .arg(&report)
        .output()
        .expect("run story-report");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("run_ended"));
    assert!(!report.exists());
}

#[test]
fn out_of_order_event_names_the_line() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let events = temp_dir.path().join("events.jsonl");
    fs::write(
        &events,
        "{\"event\":\"run_started\",\"count\":1}\n{\"event\":\"step_succeeded\",\"step_type\":\"given\",\"description\":{\"name\":\"orphan\"}}\n",
    )
    .expect("write events");

    let output = Command::new(binary())
        .arg("render")
        .arg("--events")
        .arg(&events)
        .output()
        .expect("run story-report");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("event line 2"), "stderr: {stderr}");
    assert!(stderr.contains("no open scenario"), "stderr: {stderr}");
}

#[test]
fn custom_config_changes_shell_and_placeholders() {
    let fixture = TestFixture::load("login").expect("Failed to load login fixture");
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let config_path = temp_dir.path().join("report-config.json");

    let init = Command::new(binary())
        .arg("init-config")
        .arg("--out")
        .arg(&config_path)
        .output()
        .expect("run init-config");
    assert!(init.status.success());

    let mut config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config_path).expect("read config"))
            .expect("parse config");
    config["title"] = "Nightly <stories>".into();
    config["scripts"] = serde_json::json!([]);
    config["placeholder_pattern"] = "\\$password".into();
    fs::write(&config_path, config.to_string()).expect("write config");

    let again = Command::new(binary())
        .arg("init-config")
        .arg("--out")
        .arg(&config_path)
        .output()
        .expect("run init-config");
    assert!(!again.status.success());

    let output = Command::new(binary())
        .arg("render")
        .arg("--events")
        .arg(fixture.events_path())
        .arg("--config")
        .arg(&config_path)
        .output()
        .expect("run story-report");
    assert!(output.status.success());
    let report = String::from_utf8(output.stdout).expect("utf-8 report");
    assert!(report.contains("<title>Nightly &lt;stories&gt;</title>"));
    assert!(!report.contains("<script"));
    assert!(report.contains("And a password of <span class=\"param\">s3cret</span>"));
    assert!(report.contains("Given a user named $name</li>"));
}
