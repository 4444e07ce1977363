//! Atomic output files.
//!
//! Reports are written to a temp file beside the destination and renamed into
//! place, so a failed render never leaves a truncated report behind.
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Create a temp file in the destination's directory.
pub fn create_staged_file(dest: &Path) -> Result<NamedTempFile> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    NamedTempFile::new_in(parent).with_context(|| format!("stage {}", dest.display()))
}

pub fn publish_staged_file(staged: NamedTempFile, dest: &Path) -> Result<()> {
    staged
        .persist(dest)
        .map_err(|err| err.error)
        .with_context(|| format!("publish {}", dest.display()))?;
    Ok(())
}

pub fn write_staged_json<T: serde::Serialize>(dest: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serialize staged JSON")?;
    let mut staged = create_staged_file(dest)?;
    staged
        .write_all(&bytes)
        .with_context(|| format!("write {}", dest.display()))?;
    publish_staged_file(staged, dest)
}
