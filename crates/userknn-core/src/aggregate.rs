//! Weighted aggregation of neighbor ratings into predicted ratings.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_AGGREGATE;
use crate::dataset::RatingDataset;
use crate::error::{Error, Result};
use crate::similarity::round2;
use crate::weights::NeighborWeights;

/// A predicted rating for an item the target user has not rated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The recommended item.
    pub item_id: String,
    /// Weighted-average rating, rounded to two decimal places.
    pub predicted_rating: f64,
}

/// Recommendations ordered by predicted rating, highest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationList(Vec<Recommendation>);

impl RecommendationList {
    /// Number of recommendations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no recommendations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over recommendations, best first.
    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation> {
        self.0.iter()
    }

    /// Returns the recommendations as a slice.
    pub fn as_slice(&self) -> &[Recommendation] {
        &self.0
    }

    /// Consumes the list, returning the recommendations.
    pub fn into_vec(self) -> Vec<Recommendation> {
        self.0
    }
}

impl IntoIterator for RecommendationList {
    type IntoIter = std::vec::IntoIter<Recommendation>;
    type Item = Recommendation;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecommendationList {
    type IntoIter = std::slice::Iter<'a, Recommendation>;
    type Item = &'a Recommendation;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Predicts ratings for every item `target` has not rated and returns the
/// best `limit` of them.
///
/// Each item's prediction is the sum of `weight * rating` over the weighted
/// neighbors. A neighbor who never rated the item contributes zero rather
/// than an imputed rating, so predictions favor items rated across much of
/// the neighborhood. This is part of the recommendation semantics, not an
/// approximation to be corrected.
///
/// Items with a prediction of exactly zero carry no signal and are dropped.
/// Equal predictions keep item id order.
///
/// # Errors
///
/// Returns an `InvalidTargetUser` error if `target` is not in the dataset.
pub fn aggregate(
    dataset: &RatingDataset,
    weights: &NeighborWeights,
    target: &str,
    limit: NonZeroUsize,
) -> Result<RecommendationList> {
    let target_ratings = dataset
        .get(target)
        .ok_or_else(|| Error::invalid_target_user(target))?;

    let universe = dataset.items();
    let mut predictions: Vec<Recommendation> = universe
        .iter()
        .copied()
        .filter(|item| !target_ratings.contains(item))
        .filter_map(|item| {
            let predicted: f64 = weights
                .iter()
                .filter_map(|(neighbor, weight)| {
                    dataset
                        .get(neighbor)
                        .and_then(|ratings| ratings.get(item))
                        .map(|rating| weight * rating)
                })
                .sum();

            (predicted != 0.0).then(|| Recommendation {
                item_id: item.to_string(),
                predicted_rating: round2(predicted),
            })
        })
        .collect();

    predictions.sort_by(|a, b| b.predicted_rating.total_cmp(&a.predicted_rating));
    let available = predictions.len();
    predictions.truncate(limit.get());

    tracing::debug!(
        target: TRACING_TARGET_AGGREGATE,
        target_user = target,
        neighbors = weights.len(),
        universe = universe.len(),
        available,
        returned = predictions.len(),
        "aggregated predictions"
    );

    Ok(RecommendationList(predictions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::demo;
    use crate::neighborhood::rank;
    use crate::similarity::Pearson;

    fn n(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).unwrap()
    }

    fn run(dataset: &RatingDataset, target: &str, k: usize, m: usize) -> RecommendationList {
        let ranked = rank(dataset, target, &Pearson).unwrap();
        let weights = NeighborWeights::normalize(&ranked, n(k));
        aggregate(dataset, &weights, target, n(m)).unwrap()
    }

    fn pairs(list: &RecommendationList) -> Vec<(&str, f64)> {
        list.iter()
            .map(|r| (r.item_id.as_str(), r.predicted_rating))
            .collect()
    }

    #[test]
    fn predicts_unrated_items_from_neighbors() {
        let list = run(&demo::music_ratings(), "Hailey", 2, 10);
        assert_eq!(
            pairs(&list),
            vec![("Phoenix", 5.0), ("Slightly Stoopid", 2.81), ("Blues Traveler", 2.41)]
        );
    }

    #[test]
    fn unrated_by_neighbor_contributes_zero() {
        // Deadmau5 is rated by Jordyn only among Angelica's three neighbors.
        let list = run(&demo::music_ratings(), "Angelica", 3, 10);
        assert_eq!(pairs(&list), vec![("Deadmau5", 1.64)]);
    }

    #[test]
    fn truncates_to_limit() {
        let list = run(&demo::music_ratings(), "Veronica", 3, 2);
        assert_eq!(pairs(&list), vec![("Broken Bells", 2.64), ("Vampire Weekend", 2.2)]);
    }

    #[test]
    fn never_recommends_rated_items_and_stays_sorted() {
        let dataset = demo::music_ratings();
        for user in dataset.users() {
            for k in 1..=8 {
                let list = run(&dataset, user, k, 3);
                let rated = dataset.get(user).unwrap();

                assert!(list.len() <= 3);
                assert!(list.iter().all(|r| !rated.contains(&r.item_id)));
                assert!(list.iter().all(|r| r.predicted_rating != 0.0));
                assert!(
                    list.as_slice()
                        .windows(2)
                        .all(|w| w[0].predicted_rating >= w[1].predicted_rating)
                );
            }
        }
    }

    #[test]
    fn nothing_to_recommend_when_neighbor_adds_no_items() {
        // Veronica is Angelica's closest neighbor and rated a subset of her bands.
        assert!(run(&demo::music_ratings(), "Angelica", 1, 10).is_empty());
    }

    #[test]
    fn empty_weights_yield_empty_list() {
        let dataset = demo::music_ratings();
        let list = aggregate(&dataset, &NeighborWeights::default(), "Hailey", n(10)).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn ties_keep_item_id_order() {
        let dataset = RatingDataset::from_json_str(
            r#"{
                "me": {"a": 1, "b": 2, "c": 3},
                "you": {"a": 1, "b": 2, "c": 3, "zulu": 4, "alpha": 4, "mike": 4}
            }"#,
        )
        .unwrap();

        let list = run(&dataset, "me", 1, 10);
        assert_eq!(pairs(&list), vec![("alpha", 4.0), ("mike", 4.0), ("zulu", 4.0)]);
    }

    #[test]
    fn half_way_predictions_round_to_even() {
        let dataset = RatingDataset::from_json_str(
            r#"{
                "me": {"a": 1, "b": 2, "c": 3},
                "u1": {"a": 1, "b": 2, "c": 3, "z": 2.25},
                "u2": {"a": 1, "b": 2, "c": 3, "z": 4.0}
            }"#,
        )
        .unwrap();

        // Equal weights of 0.5 put the sum at exactly 3.125.
        let list = run(&dataset, "me", 2, 10);
        assert_eq!(pairs(&list), vec![("z", 3.12)]);
    }

    #[test]
    fn exact_zero_predictions_are_dropped() {
        let dataset = RatingDataset::from_json_str(
            r#"{
                "me": {"a": 1, "b": 2, "c": 3},
                "you": {"a": 1, "b": 2, "c": 3, "silent": 0, "loud": 5}
            }"#,
        )
        .unwrap();

        let list = run(&dataset, "me", 1, 10);
        assert_eq!(pairs(&list), vec![("loud", 5.0)]);
    }

    #[test]
    fn missing_target_is_an_error() {
        let dataset = demo::music_ratings();
        let err = aggregate(&dataset, &NeighborWeights::default(), "Nobody", n(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTargetUser);
    }

    #[test]
    fn serializes_as_array_of_objects() {
        let list = run(&demo::music_ratings(), "Sam", 3, 1);
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"item_id":"Vampire Weekend","predicted_rating":1.51}]"#);
    }
}
