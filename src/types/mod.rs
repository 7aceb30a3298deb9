//! Core data types for classification results.
//!
//! A score vector is the ordered list of class-confidence values the
//! service returns; labels are caller-supplied names aligned to it by
//! index. Positions past the end of the label list get a synthetic
//! `"#<index>"` placeholder.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::cmp::Ordering;

/// Ordered sequence of class-confidence values.
pub type ScoreVector = Vec<f64>;

/// A (label, score) pair.
///
/// Serializes as a two-element JSON tuple, `["dog", 0.9]`, matching the
/// wire shape of labeled output.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledScore {
    /// Human-readable class name, or a `"#<index>"` placeholder.
    pub label: String,
    /// Class-confidence value.
    pub score: f64,
}

impl LabeledScore {
    /// Creates a new labeled score.
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

impl Serialize for LabeledScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.label, self.score).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LabeledScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (label, score) = <(String, f64)>::deserialize(deserializer)?;
        Ok(Self { label, score })
    }
}

/// Returns the label for an index: the caller-supplied one when present,
/// otherwise the `"#<index>"` placeholder.
fn label_at<S: AsRef<str>>(labels: &[S], index: usize) -> String {
    match labels.get(index) {
        Some(label) => label.as_ref().to_string(),
        None => format!("#{}", index),
    }
}

/// Pairs every score with its label and sorts descending by score.
///
/// The output always has one entry per input score, regardless of how many
/// labels were supplied. The sort is stable, so entries with equal scores
/// keep their original index order. NaN scores compare as equal to
/// everything and stay where the stable sort leaves them.
pub fn attach_labels<S: AsRef<str>>(scores: &[f64], labels: &[S]) -> Vec<LabeledScore> {
    let mut labeled: Vec<LabeledScore> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| LabeledScore::new(label_at(labels, index), score))
        .collect();

    labeled.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    labeled
}

/// Returns at most the first `top` entries of a labeled result.
///
/// Silently returns fewer when the result is shorter than `top`.
pub fn top_k(mut labeled: Vec<LabeledScore>, top: usize) -> Vec<LabeledScore> {
    labeled.truncate(top);
    labeled
}
