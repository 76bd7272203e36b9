//! Output configuration.

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// How recommendations are written to stdout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One tab-separated `item  rating` line per recommendation.
    #[default]
    Text,
    /// A JSON array of `{item_id, predicted_rating}` objects.
    Json,
}

/// Output options.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format.
    #[arg(short = 'f', long = "format", env = "USERKNN_FORMAT", value_enum, default_value_t)]
    #[serde(default)]
    pub format: OutputFormat,

    /// Also print the selected neighbors and their weights.
    #[arg(long = "show-neighbors")]
    #[serde(default)]
    pub show_neighbors: bool,
}
