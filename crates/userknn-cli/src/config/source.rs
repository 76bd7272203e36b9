//! Dataset source configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};
use userknn_core::{RatingDataset, demo};

use crate::TRACING_TARGET_DATASET;

/// Where the rating dataset comes from.
///
/// Exactly one of `--dataset` and `--demo` must be given.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[group(required = true, multiple = false)]
pub struct SourceConfig {
    /// Path to a JSON rating dataset.
    ///
    /// The file holds one object per user, mapping item ids to numeric
    /// ratings: `{"alice": {"dune": 4.5, "heat": 3}, ...}`.
    #[arg(short = 'd', long = "dataset", env = "USERKNN_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Use the built-in music rating dataset instead of a file.
    #[arg(long = "demo")]
    #[serde(default)]
    pub demo: bool,
}

impl SourceConfig {
    /// Loads the configured dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a valid
    /// rating dataset.
    pub fn load(&self) -> anyhow::Result<RatingDataset> {
        if self.demo {
            tracing::debug!(target: TRACING_TARGET_DATASET, "using built-in demo dataset");
            return Ok(demo::music_ratings());
        }

        let path = self
            .dataset
            .as_deref()
            .context("no dataset given, pass --dataset <PATH> or --demo")?;

        let file = File::open(path)
            .with_context(|| format!("failed to open dataset '{}'", path.display()))?;
        let dataset = RatingDataset::from_json_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse dataset '{}'", path.display()))?;

        tracing::info!(
            target: TRACING_TARGET_DATASET,
            path = %path.display(),
            users = dataset.len(),
            items = dataset.items().len(),
            "dataset loaded"
        );

        Ok(dataset)
    }
}
