//! Convenient re-exports for common use.

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::{
    NeighborWeights, RatingDataset, RatingVector, Recommendation, RecommendationList, Recommender,
    RecommenderConfig, Similarity, SimilarityMetric,
};
