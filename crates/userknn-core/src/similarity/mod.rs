//! Similarity metrics between two users' rating vectors.
//!
//! The pipeline only depends on the [`Similarity`] trait, so a metric can be
//! swapped without touching neighbor selection or aggregation. Configuration
//! picks an implementation through [`SimilarityMetric`].

mod pearson;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub use pearson::Pearson;

use crate::dataset::RatingVector;

/// A symmetric similarity score between two rating vectors.
///
/// Returns `None` when the score is undefined for the pair (for example, the
/// vectors share no rated items). Undefined pairs are excluded from the
/// neighborhood rather than treated as errors. Defined scores lie in `[-1, 1]`.
pub trait Similarity: Send + Sync {
    /// Scores the similarity of `x` and `y`.
    ///
    /// Implementations must satisfy `score(x, y) == score(y, x)`.
    fn score(&self, x: &RatingVector, y: &RatingVector) -> Option<f64>;

    /// Short metric name used in logs.
    fn name(&self) -> &'static str;
}

/// Selects a built-in [`Similarity`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "config", derive(clap::ValueEnum))]
pub enum SimilarityMetric {
    /// Pearson correlation over co-rated items.
    #[default]
    Pearson,
}

impl SimilarityMetric {
    /// Builds the metric implementation.
    pub fn build(self) -> Box<dyn Similarity> {
        match self {
            Self::Pearson => Box::new(Pearson),
        }
    }
}

/// Rounds to two decimal places, sending exact halves to the even neighbor.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
