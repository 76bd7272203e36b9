//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── user                            # target user id
//! ├── source: SourceConfig            # --dataset <PATH> | --demo
//! ├── recommender: RecommenderConfig  # neighbors (k), limit (m), metric
//! └── output: OutputConfig            # format, show-neighbors
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//!
//! # Example
//!
//! ```bash
//! userknn --dataset ratings.json --user alice -k 3
//!
//! USERKNN_DATASET=ratings.json USERKNN_USER=alice USERKNN_NEIGHBORS=3 userknn
//! ```

mod output;
mod source;

use std::process;

use anyhow::anyhow;
use clap::Parser;
pub use output::{OutputConfig, OutputFormat};
use serde::{Deserialize, Serialize};
pub use source::SourceConfig;
use userknn_core::RecommenderConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "userknn")]
#[command(about = "Recommend items to a user from the ratings of similar users")]
#[command(version)]
pub struct Cli {
    /// Id of the user to recommend items for.
    #[arg(short = 'u', long = "user", env = "USERKNN_USER")]
    pub user: String,

    /// Dataset source.
    #[clap(flatten)]
    pub source: SourceConfig,

    /// Neighborhood and result size.
    #[clap(flatten)]
    pub recommender: RecommenderConfig,

    /// Output options.
    #[clap(flatten)]
    pub output: OutputConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates configuration values that clap cannot check on its own.
    ///
    /// Out-of-range neighbor and limit values are not errors; the recommender
    /// substitutes defaults for them.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.user.trim().is_empty() {
            return Err(anyhow!("Target user id must not be empty"));
        }

        Ok(())
    }

    /// Logs configuration at debug level.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            user = %self.user,
            dataset = ?self.source.dataset,
            demo = self.source.demo,
            neighbors = self.recommender.neighbors,
            limit = self.recommender.limit,
            metric = %self.recommender.metric,
            format = ?self.output.format,
            show_neighbors = self.output.show_neighbors,
            "Recommendation configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
