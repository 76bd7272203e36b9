//! End-to-end recommendation pipeline.

use crate::TRACING_TARGET_RECOMMENDER;
use crate::aggregate::{RecommendationList, aggregate};
use crate::config::{ConfigNotice, RecommenderConfig, ResolvedConfig};
use crate::dataset::RatingDataset;
use crate::error::Result;
use crate::neighborhood::{Neighbor, rank};
use crate::similarity::Similarity;
use crate::weights::NeighborWeights;

/// User-based k-nearest-neighbor recommender.
///
/// Holds only configuration and the similarity metric; every call recomputes
/// from the dataset it is given, so one recommender can serve any number of
/// datasets and concurrent callers.
///
/// ```
/// use userknn_core::{Recommender, RecommenderConfig, demo};
///
/// let recommender = Recommender::new(RecommenderConfig::new(2, 10));
/// let list = recommender.recommend(&demo::music_ratings(), "Hailey").unwrap();
///
/// assert_eq!(list.iter().next().unwrap().item_id, "Phoenix");
/// ```
pub struct Recommender {
    config: ResolvedConfig,
    notices: Vec<ConfigNotice>,
    similarity: Box<dyn Similarity>,
}

impl Recommender {
    /// Creates a recommender, substituting defaults for invalid settings.
    pub fn new(config: RecommenderConfig) -> Self {
        let (resolved, notices) = config.resolve();
        let similarity = resolved.metric.build();

        Self {
            config: resolved,
            notices,
            similarity,
        }
    }

    /// Replaces the similarity metric with a custom implementation.
    #[must_use]
    pub fn with_similarity(mut self, similarity: impl Similarity + 'static) -> Self {
        self.similarity = Box::new(similarity);
        self
    }

    /// Returns the effective configuration.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Returns the adjustments made to the supplied configuration.
    pub fn notices(&self) -> &[ConfigNotice] {
        &self.notices
    }

    /// Ranks every other user by affinity to `target`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidTargetUser` error if `target` is not in the dataset.
    pub fn rank(&self, dataset: &RatingDataset, target: &str) -> Result<Vec<Neighbor>> {
        rank(dataset, target, self.similarity.as_ref())
    }

    /// Selects and weights the k nearest neighbors of `target`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidTargetUser` error if `target` is not in the dataset.
    pub fn neighbor_weights(
        &self,
        dataset: &RatingDataset,
        target: &str,
    ) -> Result<NeighborWeights> {
        let ranked = self.rank(dataset, target)?;
        Ok(NeighborWeights::normalize(&ranked, self.config.neighbors))
    }

    /// Recommends up to m items `target` has not rated.
    ///
    /// An empty list means no neighbor had a usable signal; it is never used
    /// to report a missing user.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidTargetUser` error if `target` is not in the dataset.
    pub fn recommend(&self, dataset: &RatingDataset, target: &str) -> Result<RecommendationList> {
        let weights = self.neighbor_weights(dataset, target)?;
        self.recommend_with_weights(dataset, target, &weights)
    }

    /// Recommends up to m items `target` has not rated, aggregating over
    /// weights already obtained from [`Recommender::neighbor_weights`].
    ///
    /// # Errors
    ///
    /// Returns an `InvalidTargetUser` error if `target` is not in the dataset.
    pub fn recommend_with_weights(
        &self,
        dataset: &RatingDataset,
        target: &str,
        weights: &NeighborWeights,
    ) -> Result<RecommendationList> {
        let list = aggregate(dataset, weights, target, self.config.limit)?;

        tracing::debug!(
            target: TRACING_TARGET_RECOMMENDER,
            target_user = target,
            metric = self.similarity.name(),
            k = self.config.neighbors.get(),
            m = self.config.limit.get(),
            neighbors = weights.len(),
            recommendations = list.len(),
            "recommendation complete"
        );

        Ok(list)
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(RecommenderConfig::default())
    }
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("config", &self.config)
            .field("notices", &self.notices)
            .field("similarity", &self.similarity.name())
            .finish()
    }
}

/// Recommends up to `m` items for `target` from its `k` nearest neighbors.
///
/// Non-positive `k` or `m` fall back to 1 and 10 respectively; the
/// substitution is logged rather than treated as an error.
///
/// # Errors
///
/// Returns an `InvalidTargetUser` error if `target` is not in the dataset.
pub fn recommend(
    dataset: &RatingDataset,
    target: &str,
    k: i64,
    m: i64,
) -> Result<RecommendationList> {
    Recommender::new(RecommenderConfig::new(k, m)).recommend(dataset, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::dataset::RatingVector;
    use crate::demo;

    /// Scores every pair identically, so ranking falls back to user id order.
    struct Uniform;

    impl Similarity for Uniform {
        fn score(&self, _: &RatingVector, _: &RatingVector) -> Option<f64> {
            Some(0.0)
        }

        fn name(&self) -> &'static str {
            "uniform"
        }
    }

    fn sample() -> RatingDataset {
        RatingDataset::from_json_str(
            r#"{"A": {"x": 5, "y": 3}, "B": {"x": 4, "y": 4}, "C": {"x": 1, "y": 5}}"#,
        )
        .unwrap()
    }

    #[test]
    fn zero_variance_and_anti_correlated_neighbors_yield_nothing() {
        let recommender = Recommender::new(RecommenderConfig::new(2, 10));
        let dataset = sample();

        let ranked = recommender.rank(&dataset, "A").unwrap();
        assert_eq!(ranked, vec![Neighbor::from_score("C", -1.0)]);
        assert_eq!(ranked[0].affinity, 0.0);

        assert!(recommender.neighbor_weights(&dataset, "A").unwrap().is_empty());
        assert!(recommender.recommend(&dataset, "A").unwrap().is_empty());
    }

    #[test]
    fn invalid_counts_are_replaced_and_reported() {
        let recommender = Recommender::new(RecommenderConfig::new(0, -5));

        assert_eq!(recommender.config().neighbors.get(), 1);
        assert_eq!(recommender.config().limit.get(), 10);
        assert_eq!(recommender.notices().len(), 2);

        let list = recommender.recommend(&demo::music_ratings(), "Chan").unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn missing_target_fails_instead_of_returning_empty() {
        let err = recommend(&demo::music_ratings(), "Nobody", 3, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTargetUser);
    }

    #[test]
    fn free_function_matches_recommender() {
        let dataset = demo::music_ratings();
        let list = recommend(&dataset, "Chan", 2, 10).unwrap();
        let pairs: Vec<_> = list.iter().map(|r| (r.item_id.as_str(), r.predicted_rating)).collect();
        assert_eq!(pairs, vec![("The Strokes", 3.25), ("Vampire Weekend", 2.99)]);
    }

    #[test]
    fn precomputed_weights_give_the_same_list() {
        let recommender = Recommender::new(RecommenderConfig::new(2, 10));
        let dataset = demo::music_ratings();

        let weights = recommender.neighbor_weights(&dataset, "Hailey").unwrap();
        let list = recommender
            .recommend_with_weights(&dataset, "Hailey", &weights)
            .unwrap();

        assert_eq!(list, recommender.recommend(&dataset, "Hailey").unwrap());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn precomputed_weights_still_check_the_target() {
        let recommender = Recommender::default();
        let err = recommender
            .recommend_with_weights(&demo::music_ratings(), "Nobody", &NeighborWeights::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTargetUser);
    }

    #[test]
    fn custom_similarity_is_used() {
        let recommender = Recommender::new(RecommenderConfig::new(2, 10)).with_similarity(Uniform);
        let weights = recommender.neighbor_weights(&demo::music_ratings(), "Hailey").unwrap();

        let users: Vec<_> = weights.iter().map(|(user, _)| user).collect();
        assert_eq!(users, vec!["Angelica", "Bill"]);
        assert_eq!(weights.get("Angelica"), Some(0.5));
    }

    #[test]
    fn recommender_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recommender>();
        assert_send_sync::<RatingDataset>();
    }
}
