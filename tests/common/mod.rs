//! Shared test infrastructure for integration tests.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Expectations loaded from fixture.json.
#[derive(Debug, Deserialize)]
pub struct FixtureConfig {
    pub headline: String,
    pub succeeded: usize,
    pub failed: usize,
    pub pending: usize,
    /// Story container classes in document order.
    #[serde(default)]
    pub story_classes: Vec<String>,
    #[serde(default)]
    pub contains: Vec<String>,
    #[serde(default)]
    pub absent: Vec<String>,
}

/// Event log plus expectations under tests/fixtures/{name}/.
pub struct TestFixture {
    pub fixture_dir: PathBuf,
    pub config: FixtureConfig,
}

/// Captured run of the story-report binary.
pub struct RenderResult {
    pub output: Output,
    pub report: String,
    pub summary: serde_json::Value,
}

fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

pub fn binary() -> &'static str {
    env!("CARGO_BIN_EXE_story-report")
}

impl TestFixture {
    /// Load a fixture by name from tests/fixtures/{name}/.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        let fixture_dir = manifest_dir().join("tests/fixtures").join(name);
        let config_path = fixture_dir.join("fixture.json");
        let config: FixtureConfig =
            serde_json::from_str(&std::fs::read_to_string(&config_path).map_err(|e| {
                anyhow::anyhow!("Failed to read {}: {}", config_path.display(), e)
            })?)?;
        Ok(Self {
            fixture_dir,
            config,
        })
    }

    pub fn events_path(&self) -> PathBuf {
        self.fixture_dir.join("events.jsonl")
    }

    /// Render the fixture's event log into `work_dir`.
    pub fn render(&self, work_dir: &Path) -> anyhow::Result<RenderResult> {
        let report_path = work_dir.join("report.html");
        let summary_path = work_dir.join("summary.json");
        let output = Command::new(binary())
            .arg("render")
            .arg("--events")
            .arg(self.events_path())
            .arg("--out")
            .arg(&report_path)
            .arg("--summary")
            .arg(&summary_path)
            .output()?;
        if !output.status.success() {
            return Err(anyhow::anyhow!(
                "story-report failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ));
        }
        let report = std::fs::read_to_string(&report_path)?;
        let summary = serde_json::from_str(&std::fs::read_to_string(&summary_path)?)?;
        Ok(RenderResult {
            output,
            report,
            summary,
        })
    }

    /// Check a rendered report against the fixture expectations.
    pub fn assert_matches(&self, result: &RenderResult) {
        let config = &self.config;
        assert!(
            result.report.contains(&config.headline),
            "missing headline {:?}",
            config.headline
        );
        assert_eq!(result.summary["succeeded"], config.succeeded);
        assert_eq!(result.summary["failed"], config.failed);
        assert_eq!(result.summary["pending"], config.pending);

        let classes: Vec<&str> = result
            .report
            .match_indices("<dl class=\"story ")
            .map(|(idx, _)| {
                let rest = &result.report[idx + "<dl class=\"".len()..];
                &rest[..rest.find('"').unwrap_or(rest.len())]
            })
            .collect();
        assert_eq!(classes, config.story_classes);

        for needle in &config.contains {
            assert!(
                result.report.contains(needle.as_str()),
                "report missing {needle:?}"
            );
        }
        for needle in &config.absent {
            assert!(
                !result.report.contains(needle.as_str()),
                "report unexpectedly contains {needle:?}"
            );
        }
    }
}
