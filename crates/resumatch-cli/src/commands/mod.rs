//! Subcommands and the input handling they share.

pub mod config;
pub mod extract;
pub mod jobs;
pub mod matching;
pub mod roles;

use std::path::{Path, PathBuf};

use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use resumatch_core::loader::{DocumentBatch, load_documents};
use resumatch_core::models::config::ResumatchConfig;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Load the config named on the command line, else the default file if it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ResumatchConfig> {
    let config = match config_path {
        Some(path) => ResumatchConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                debug!("Using config from {}", default_path.display());
                ResumatchConfig::from_file(&default_path)?
            } else {
                ResumatchConfig::default()
            }
        }
    };

    let issues = config.validate();
    if !issues.is_empty() {
        anyhow::bail!("Invalid configuration:\n  - {}", issues.join("\n  - "));
    }

    Ok(config)
}

/// Expand a glob pattern (or plain path) to the files it names.
pub fn expand_inputs(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", pattern);
    }

    Ok(files)
}

/// Load every file matching `pattern` into one batch.
///
/// Unreadable files abort; broken records inside a file are only reported.
pub fn load_inputs(pattern: &str) -> anyhow::Result<DocumentBatch> {
    let files = expand_inputs(pattern)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut batch = DocumentBatch::default();
    for path in &files {
        let loaded = load_documents(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

        for skipped in &loaded.skipped {
            warn!("{}: record {} skipped: {}", path.display(), skipped.index, skipped.reason);
        }
        batch.extend(loaded);
        pb.inc(1);
    }
    pb.finish_and_clear();

    eprintln!(
        "{} Loaded {} documents from {} files ({} records skipped)",
        style("ℹ").blue(),
        batch.len(),
        files.len(),
        batch.skipped.len()
    );

    if batch.is_empty() {
        anyhow::bail!("No usable documents found in {}", pattern);
    }

    Ok(batch)
}
