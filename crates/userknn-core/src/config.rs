//! Recommender configuration.
//!
//! [`RecommenderConfig`] holds values as the caller supplied them, including
//! out-of-range ones. [`RecommenderConfig::resolve`] substitutes defaults for
//! anything non-positive and reports each substitution as a [`ConfigNotice`]
//! instead of failing.

use std::num::NonZeroUsize;

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;
use crate::similarity::SimilarityMetric;

/// Default number of neighbors.
pub const DEFAULT_NEIGHBORS: NonZeroUsize = NonZeroUsize::MIN;

/// Default number of recommendations.
pub const DEFAULT_LIMIT: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Recommender configuration as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[builder(
    name = "RecommenderConfigBuilder",
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(private, name = "build_inner", error = "RecommenderConfigError")
)]
pub struct RecommenderConfig {
    /// Number of most similar users to aggregate over (k).
    ///
    /// Values of zero or less fall back to 1.
    #[cfg_attr(
        feature = "config",
        arg(
            short = 'k',
            long = "neighbors",
            env = "USERKNN_NEIGHBORS",
            default_value_t = 1,
            allow_negative_numbers = true
        )
    )]
    #[builder(default = "default_neighbors()")]
    #[serde(default = "default_neighbors")]
    pub neighbors: i64,

    /// Maximum number of recommendations to return (m).
    ///
    /// Values of zero or less fall back to 10.
    #[cfg_attr(
        feature = "config",
        arg(
            short = 'm',
            long = "limit",
            env = "USERKNN_LIMIT",
            default_value_t = 10,
            allow_negative_numbers = true
        )
    )]
    #[builder(default = "default_limit()")]
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Similarity metric used to rank neighbors.
    #[cfg_attr(
        feature = "config",
        arg(long = "metric", env = "USERKNN_METRIC", value_enum, default_value_t)
    )]
    #[builder(default)]
    #[serde(default)]
    pub metric: SimilarityMetric,
}

/// Error type for RecommenderConfig builder.
pub type RecommenderConfigError = derive_builder::UninitializedFieldError;

impl RecommenderConfigBuilder {
    /// Build the configuration.
    pub fn build(self) -> Result<RecommenderConfig, RecommenderConfigError> {
        self.build_inner()
    }
}

fn default_neighbors() -> i64 {
    DEFAULT_NEIGHBORS.get() as i64
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT.get() as i64
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            neighbors: default_neighbors(),
            limit: default_limit(),
            metric: SimilarityMetric::default(),
        }
    }
}

impl RecommenderConfig {
    /// Creates a configuration with the given neighbor and result counts.
    pub fn new(neighbors: i64, limit: i64) -> Self {
        Self {
            neighbors,
            limit,
            metric: SimilarityMetric::default(),
        }
    }

    /// Create a builder for this configuration.
    pub fn builder() -> RecommenderConfigBuilder {
        RecommenderConfigBuilder::default()
    }

    /// Replaces invalid values with defaults.
    ///
    /// Every substitution is returned as a notice and logged at warn level.
    pub fn resolve(&self) -> (ResolvedConfig, Vec<ConfigNotice>) {
        let mut notices = Vec::new();

        let neighbors = positive(self.neighbors).unwrap_or_else(|| {
            notices.push(ConfigNotice::NeighborsDefaulted {
                given: self.neighbors,
                default: DEFAULT_NEIGHBORS,
            });
            DEFAULT_NEIGHBORS
        });

        let limit = positive(self.limit).unwrap_or_else(|| {
            notices.push(ConfigNotice::LimitDefaulted {
                given: self.limit,
                default: DEFAULT_LIMIT,
            });
            DEFAULT_LIMIT
        });

        for notice in &notices {
            tracing::warn!(target: TRACING_TARGET_CONFIG, %notice, "configuration adjusted");
        }

        let resolved = ResolvedConfig {
            neighbors,
            limit,
            metric: self.metric,
        };

        (resolved, notices)
    }
}

fn positive(value: i64) -> Option<NonZeroUsize> {
    usize::try_from(value).ok().and_then(NonZeroUsize::new)
}

/// Configuration after defaults have been substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// Number of neighbors (k).
    pub neighbors: NonZeroUsize,
    /// Maximum number of recommendations (m).
    pub limit: NonZeroUsize,
    /// Similarity metric.
    pub metric: SimilarityMetric,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        RecommenderConfig::default().resolve().0
    }
}

/// A non-fatal adjustment made while resolving configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigNotice {
    /// The neighbor count was not positive.
    #[display("invalid neighbor count {given} (must be > 0), defaulting to {default}")]
    NeighborsDefaulted {
        /// Value supplied by the caller.
        given: i64,
        /// Value used instead.
        default: NonZeroUsize,
    },
    /// The recommendation limit was not positive.
    #[display("invalid recommendation limit {given} (must be > 0), defaulting to {default}")]
    LimitDefaulted {
        /// Value supplied by the caller.
        given: i64,
        /// Value used instead.
        default: NonZeroUsize,
    },
}
