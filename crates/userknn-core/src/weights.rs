//! Conversion of the top-k neighbors into aggregation weights.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use serde::Serialize;

use crate::TRACING_TARGET_WEIGHTS;
use crate::neighborhood::Neighbor;

/// Non-negative per-neighbor weights that sum to 1.
///
/// Empty when no neighbor carries any signal, in which case aggregation
/// produces no recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NeighborWeights(BTreeMap<String, f64>);

impl NeighborWeights {
    /// Takes the first `k` entries of `ranked` and scales their affinities so
    /// they sum to 1.
    ///
    /// If the selected affinities sum to zero the result is empty: a
    /// neighborhood with no total affinity has nothing to contribute.
    pub fn normalize(ranked: &[Neighbor], k: NonZeroUsize) -> Self {
        let selected = &ranked[..ranked.len().min(k.get())];
        let total: f64 = selected.iter().map(|n| n.affinity).sum();

        if total == 0.0 {
            tracing::debug!(
                target: TRACING_TARGET_WEIGHTS,
                selected = selected.len(),
                "neighborhood carries no affinity"
            );
            return Self::default();
        }

        let weights = selected
            .iter()
            .map(|n| (n.user_id.clone(), n.affinity / total))
            .collect();

        tracing::debug!(
            target: TRACING_TARGET_WEIGHTS,
            k = k.get(),
            selected = selected.len(),
            total_affinity = total,
            "normalized neighbor weights"
        );

        Self(weights)
    }

    /// Returns the weight of a neighbor.
    pub fn get(&self, user_id: &str) -> Option<f64> {
        self.0.get(user_id).copied()
    }

    /// Iterates over `(user_id, weight)` pairs in user id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(user, weight)| (user.as_str(), *weight))
    }

    /// Number of weighted neighbors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no neighbor is weighted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all weights; 1 up to rounding unless empty.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}
