//! Report configuration.
//!
//! The config names the document title, the script and stylesheet assets the
//! page links to, and the default placeholder pattern for step templates.
use crate::render::compile_regex;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Matches `$name` style placeholders in step templates.
pub const DEFAULT_PLACEHOLDER_PATTERN: &str = r"\$[A-Za-z_][A-Za-z0-9_]*";

const DEFAULT_TITLE: &str = "Stories";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub schema_version: u32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_scripts")]
    pub scripts: Vec<String>,
    #[serde(default = "default_stylesheets")]
    pub stylesheets: Vec<String>,
    #[serde(default = "default_placeholder_pattern")]
    pub placeholder_pattern: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        default_config()
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_scripts() -> Vec<String> {
    vec![
        "javascripts/prototype.js".to_string(),
        "javascripts/scriptaculous.js".to_string(),
        "javascripts/rspec.js".to_string(),
    ]
}

fn default_stylesheets() -> Vec<String> {
    vec!["stylesheets/rspec.css".to_string()]
}

fn default_placeholder_pattern() -> String {
    DEFAULT_PLACEHOLDER_PATTERN.to_string()
}

/// Build the config used when no config file is given.
pub fn default_config() -> ReportConfig {
    ReportConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        title: default_title(),
        scripts: default_scripts(),
        stylesheets: default_stylesheets(),
        placeholder_pattern: default_placeholder_pattern(),
    }
}

/// Render a pretty JSON config stub.
pub fn config_stub() -> String {
    let config = default_config();
    serde_json::to_string_pretty(&config).expect("serialize config stub")
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<ReportConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ReportConfig =
        serde_json::from_slice(&bytes).context("parse report config JSON")?;
    validate_config(&config).with_context(|| format!("validate config {}", path.display()))?;
    Ok(config)
}

/// Validate schema version, title and placeholder pattern.
pub fn validate_config(config: &ReportConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported report config schema_version {}",
            config.schema_version
        ));
    }
    if config.title.trim().is_empty() {
        return Err(anyhow!("report config title must not be empty"));
    }
    compile_regex(&config.placeholder_pattern).context("compile placeholder_pattern")?;
    Ok(())
}
