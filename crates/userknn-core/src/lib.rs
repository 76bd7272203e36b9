#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for configuration resolution.
pub const TRACING_TARGET_CONFIG: &str = "userknn_core::config";

/// Tracing target for neighbor ranking.
pub const TRACING_TARGET_NEIGHBORHOOD: &str = "userknn_core::neighborhood";

/// Tracing target for weight normalization.
pub const TRACING_TARGET_WEIGHTS: &str = "userknn_core::weights";

/// Tracing target for rating aggregation.
pub const TRACING_TARGET_AGGREGATE: &str = "userknn_core::aggregate";

/// Tracing target for the end-to-end pipeline.
pub const TRACING_TARGET_RECOMMENDER: &str = "userknn_core::recommender";

mod aggregate;
mod config;
mod dataset;
mod error;
mod neighborhood;
mod recommender;
mod weights;

pub mod demo;
pub mod prelude;
pub mod similarity;

pub use aggregate::{Recommendation, RecommendationList, aggregate};
pub use config::{
    ConfigNotice, DEFAULT_LIMIT, DEFAULT_NEIGHBORS, RecommenderConfig, RecommenderConfigBuilder,
    RecommenderConfigError, ResolvedConfig,
};
pub use dataset::{RatingDataset, RatingVector};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use neighborhood::{Neighbor, rank};
pub use recommender::{Recommender, recommend};
pub use similarity::{Pearson, Similarity, SimilarityMetric};
pub use weights::NeighborWeights;
