//! Ranking of candidate neighbors by similarity to a target user.

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_NEIGHBORHOOD;
use crate::dataset::RatingDataset;
use crate::error::{Error, Result};
use crate::similarity::Similarity;

/// A candidate neighbor and its affinity to the target user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// The neighbor's user id.
    pub user_id: String,
    /// Similarity mapped from `[-1, 1]` into `[0, 1]`.
    pub affinity: f64,
}

impl Neighbor {
    /// Creates a neighbor from a raw similarity score in `[-1, 1]`.
    pub fn from_score(user_id: impl Into<String>, score: f64) -> Self {
        Self {
            user_id: user_id.into(),
            affinity: (score + 1.0) / 2.0,
        }
    }
}

/// Ranks every other user in the dataset by affinity to `target`, highest
/// first.
///
/// Users whose similarity to the target is undefined are left out. Equal
/// affinities keep user id order. The full ranking is returned; choosing the
/// top k is left to [`NeighborWeights::normalize`].
///
/// # Errors
///
/// Returns an `InvalidTargetUser` error if `target` is not in the dataset.
///
/// [`NeighborWeights::normalize`]: crate::NeighborWeights::normalize
pub fn rank(
    dataset: &RatingDataset,
    target: &str,
    similarity: &dyn Similarity,
) -> Result<Vec<Neighbor>> {
    let target_ratings = dataset
        .get(target)
        .ok_or_else(|| Error::invalid_target_user(target))?;

    let mut ranked: Vec<Neighbor> = dataset
        .iter()
        .filter(|(user, _)| *user != target)
        .filter_map(|(user, ratings)| match similarity.score(target_ratings, ratings) {
            Some(score) => Some(Neighbor::from_score(user, score)),
            None => {
                tracing::trace!(
                    target: TRACING_TARGET_NEIGHBORHOOD,
                    user = user,
                    metric = similarity.name(),
                    "similarity undefined, skipping user"
                );
                None
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.affinity.total_cmp(&a.affinity));

    tracing::debug!(
        target: TRACING_TARGET_NEIGHBORHOOD,
        target_user = target,
        candidates = dataset.len().saturating_sub(1),
        ranked = ranked.len(),
        "ranked neighbors"
    );

    Ok(ranked)
}
