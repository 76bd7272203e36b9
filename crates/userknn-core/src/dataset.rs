//! Rating data model.
//!
//! A [`RatingDataset`] maps user ids to their [`RatingVector`], and a rating
//! vector maps item ids to ratings. Both are backed by ordered maps so that
//! iteration (and therefore every ranking built on top of it) is reproducible.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The ratings a single user has given, keyed by item id.
///
/// Ratings are unconstrained floating point values; callers typically use
/// a 1.0 to 5.0 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingVector(BTreeMap<String, f64>);

impl RatingVector {
    /// Creates an empty rating vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a rating, returning the previous rating for the item if any.
    pub fn insert(&mut self, item_id: impl Into<String>, rating: f64) -> Option<f64> {
        self.0.insert(item_id.into(), rating)
    }

    /// Returns the rating for an item.
    pub fn get(&self, item_id: &str) -> Option<f64> {
        self.0.get(item_id).copied()
    }

    /// Returns whether the item has been rated.
    pub fn contains(&self, item_id: &str) -> bool {
        self.0.contains_key(item_id)
    }

    /// Number of rated items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no item has been rated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(item_id, rating)` pairs in item id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(item, rating)| (item.as_str(), *rating))
    }

    /// Iterates over rated item ids in order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over items rated by both vectors, yielding `(item, x, y)`.
    ///
    /// Items are visited in id order regardless of which vector is `self`.
    pub fn co_rated<'a>(
        &'a self,
        other: &'a RatingVector,
    ) -> impl Iterator<Item = (&'a str, f64, f64)> + 'a {
        self.0.iter().filter_map(move |(item, x)| {
            other.0.get(item).map(|y| (item.as_str(), *x, *y))
        })
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RatingVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Ratings for every user, keyed by user id.
///
/// The dataset is owned by the caller and only ever borrowed by the
/// recommendation pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingDataset(BTreeMap<String, RatingVector>);

impl RatingDataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a dataset from a JSON object of objects.
    ///
    /// ```
    /// use userknn_core::RatingDataset;
    ///
    /// let dataset = RatingDataset::from_json_str(r#"{"ann": {"dune": 4.5}}"#).unwrap();
    /// assert_eq!(dataset.get("ann").and_then(|r| r.get("dune")), Some(4.5));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a dataset from a reader yielding a JSON object of objects.
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Adds or replaces a user's ratings.
    pub fn insert(
        &mut self,
        user_id: impl Into<String>,
        ratings: RatingVector,
    ) -> Option<RatingVector> {
        self.0.insert(user_id.into(), ratings)
    }

    /// Returns a user's ratings.
    pub fn get(&self, user_id: &str) -> Option<&RatingVector> {
        self.0.get(user_id)
    }

    /// Returns whether the dataset has an entry for the user.
    pub fn contains_user(&self, user_id: &str) -> bool {
        self.0.contains_key(user_id)
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the dataset has no users.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(user_id, ratings)` pairs in user id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RatingVector)> {
        self.0.iter().map(|(user, ratings)| (user.as_str(), ratings))
    }

    /// Iterates over user ids in order.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the item universe: every item id rated by at least one user.
    pub fn items(&self) -> BTreeSet<&str> {
        self.0.values().flat_map(RatingVector::items).collect()
    }
}

impl<K: Into<String>> FromIterator<(K, RatingVector)> for RatingDataset {
    fn from_iter<I: IntoIterator<Item = (K, RatingVector)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
