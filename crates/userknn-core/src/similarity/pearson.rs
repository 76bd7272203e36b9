//! Pearson correlation over co-rated items.

use super::{Similarity, round2};
use crate::dataset::RatingVector;

/// Pearson correlation coefficient restricted to the items both users rated,
/// rounded to two decimal places.
///
/// The score is undefined when the users share no items, or when either
/// user's shared ratings have zero variance.
///
/// ```
/// use userknn_core::{Pearson, RatingVector, Similarity};
///
/// let x: RatingVector = [("a", 1.0), ("b", 2.0), ("c", 3.0)].into_iter().collect();
/// let y: RatingVector = [("a", 2.0), ("b", 4.0), ("c", 6.0)].into_iter().collect();
/// assert_eq!(Pearson.score(&x, &y), Some(1.0));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pearson;

impl Similarity for Pearson {
    fn score(&self, x: &RatingVector, y: &RatingVector) -> Option<f64> {
        let mut n = 0usize;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);

        for (_, rx, ry) in x.co_rated(y) {
            n += 1;
            sum_x += rx;
            sum_y += ry;
            sum_xy += rx * ry;
            sum_x2 += rx * rx;
            sum_y2 += ry * ry;
        }

        if n == 0 {
            return None;
        }

        let n = n as f64;
        let var_x = spread(sum_x2, sum_x, n)?;
        let var_y = spread(sum_y2, sum_y, n)?;

        let denominator = var_x.sqrt() * var_y.sqrt();
        if denominator == 0.0 {
            return None;
        }

        let r = (sum_xy - sum_x * sum_y / n) / denominator;
        r.is_finite().then(|| round2(r).clamp(-1.0, 1.0))
    }

    fn name(&self) -> &'static str {
        "pearson"
    }
}

/// Returns `n` times the variance, or `None` when it is zero.
///
/// Cancellation in `sum_sq - sum²/n` can leave a tiny residue of either sign
/// for constant ratings; anything within rounding noise of `sum_sq` counts
/// as zero.
fn spread(sum_sq: f64, sum: f64, n: f64) -> Option<f64> {
    let spread = sum_sq - sum * sum / n;
    (spread > sum_sq.abs() * 4.0 * f64::EPSILON).then_some(spread)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    fn ratings(pairs: &[(&str, f64)]) -> RatingVector {
        pairs.iter().map(|(item, rating)| (*item, *rating)).collect()
    }

    #[test]
    fn undefined_without_shared_items() {
        let x = ratings(&[("a", 1.0), ("b", 5.0)]);
        let y = ratings(&[("c", 1.0), ("d", 5.0)]);
        assert_eq!(Pearson.score(&x, &y), None);
        assert_eq!(Pearson.score(&x, &RatingVector::new()), None);
    }

    #[test]
    fn undefined_with_zero_variance() {
        let flat = ratings(&[("x", 4.0), ("y", 4.0)]);
        let varied = ratings(&[("x", 5.0), ("y", 3.0)]);
        assert_eq!(Pearson.score(&varied, &flat), None);
        assert_eq!(Pearson.score(&flat, &varied), None);
    }

    #[test]
    fn undefined_with_single_shared_item() {
        let x = ratings(&[("a", 1.0), ("b", 2.0)]);
        let y = ratings(&[("a", 3.0), ("c", 2.0)]);
        assert_eq!(Pearson.score(&x, &y), None);
    }

    #[test]
    fn constant_fractional_ratings_are_zero_variance() {
        let flat = ratings(&[("a", 0.1), ("b", 0.1), ("c", 0.1)]);
        let varied = ratings(&[("a", 1.0), ("b", 2.0), ("c", 4.0)]);
        assert_eq!(Pearson.score(&flat, &varied), None);
    }

    #[test]
    fn tiny_real_variance_is_kept_above_rounding_noise() {
        let steps = ratings(&[("a", 1.0), ("b", 2.0)]);

        // Spreads of 5e-9 and 5e-13 against a cutoff near 2 * 4 * EPSILON (~1.8e-15).
        for delta in [1e-4, 1e-6] {
            let nudged = ratings(&[("a", 1.0), ("b", 1.0 + delta)]);
            assert_eq!(Pearson.score(&nudged, &steps), Some(1.0), "delta = {delta}");
        }

        // Spreads of 5e-19 and below are indistinguishable from cancellation error.
        for delta in [1e-9, 1e-12] {
            let nudged = ratings(&[("a", 1.0), ("b", 1.0 + delta)]);
            assert_eq!(Pearson.score(&nudged, &steps), None, "delta = {delta}");
        }
    }

    #[test]
    fn spread_cutoff_scales_with_magnitude() {
        let eps = f64::EPSILON;

        assert_eq!(spread(2.0, 2.0, 2.0), None);
        assert_eq!(spread(1.0, 0.0, 2.0), Some(1.0));
        // With sum = n = 1 the spread is exactly sum_sq - 1; the cutoff is 4 ulps.
        assert_eq!(spread(1.0 + 3.0 * eps, 1.0, 1.0), None);
        assert_eq!(spread(1.0 + 4.0 * eps, 1.0, 1.0), None);
        assert_eq!(spread(1.0 + 5.0 * eps, 1.0, 1.0), Some(5.0 * eps));
        // At sum_sq = 1e6 one ulp is 2^-33 and the cutoff falls between 7 and 8 ulps.
        let ulp = 2f64.powi(-33);
        assert_eq!(spread(1e6 + 7.0 * ulp, 1e3, 1.0), None);
        assert_eq!(spread(1e6 + 8.0 * ulp, 1e3, 1.0), Some(8.0 * ulp));
        assert_eq!(spread(-1.0, 0.0, 1.0), None);
    }

    #[test]
    fn self_correlation_is_one() {
        let users = demo::music_ratings();
        for (user, vector) in users.iter() {
            assert_eq!(Pearson.score(vector, vector), Some(1.0), "user {user}");
        }
    }

    #[test]
    fn perfectly_inverse_ratings_score_minus_one() {
        let x = ratings(&[("x", 5.0), ("y", 3.0)]);
        let y = ratings(&[("x", 1.0), ("y", 5.0)]);
        assert_eq!(Pearson.score(&x, &y), Some(-1.0));
    }

    #[test]
    fn symmetric_over_every_pair() {
        let users = demo::music_ratings();
        for (_, a) in users.iter() {
            for (_, b) in users.iter() {
                assert_eq!(Pearson.score(a, b), Pearson.score(b, a));
            }
        }
    }

    #[test]
    fn matches_known_scores() {
        let users = demo::music_ratings();
        let score = |a: &str, b: &str| Pearson.score(users.get(a).unwrap(), users.get(b).unwrap());

        assert_eq!(score("Angelica", "Bill"), Some(-0.9));
        assert_eq!(score("Angelica", "Veronica"), Some(0.83));
        assert_eq!(score("Angelica", "Chan"), Some(0.82));
        assert_eq!(score("Angelica", "Dan"), Some(-0.36));
        assert_eq!(score("Hailey", "Jordyn"), Some(0.61));
        assert_eq!(score("Hailey", "Bill"), Some(0.0));
        assert_eq!(score("Hailey", "Sam"), None);
        assert_eq!(score("Hailey", "Veronica"), None);
    }
}
